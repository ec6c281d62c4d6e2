//! SVG-style path data parsing and flattening
//!
//! The world map asset is a single path-data string. Parsing splits it
//! into commands with raw argument lists; flattening resolves relative
//! coordinates, implicit command repetition, and smooth-control
//! reflection, and subdivides curves into polylines ready for scanline
//! filling.

use nom::bytes::complete::take_while;
use nom::character::complete::one_of;
use nom::multi::{many0, many1};
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::core::error::{Result, TaqwimError};

/// One path command: a letter and its raw arguments
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub op: char,
    pub args: Vec<f64>,
}

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_ascii_whitespace() || c == ',').parse(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    preceded(separators, double).parse(input)
}

fn command(input: &str) -> IResult<&str, PathCommand> {
    let (input, op) = preceded(separators, one_of("MmLlHhVvCcSsQqTtAaZz")).parse(input)?;
    let (input, args) = many0(number).parse(input)?;
    Ok((input, PathCommand { op, args }))
}

/// Parse a path-data string into its command sequence.
pub fn parse_path_data(input: &str) -> Result<Vec<PathCommand>> {
    let (rest, commands) = many1(command)
        .parse(input)
        .map_err(|e| TaqwimError::PathData(e.to_string()))?;
    let (rest, _) =
        separators(rest).map_err(|e| TaqwimError::PathData(e.to_string()))?;
    if !rest.is_empty() {
        let cut = rest.char_indices().nth(20).map_or(rest.len(), |(i, _)| i);
        return Err(TaqwimError::PathData(format!(
            "unexpected input at: {}",
            &rest[..cut]
        )));
    }
    Ok(commands)
}

/// Arguments per group for each command letter.
fn group_len(op: char) -> Option<usize> {
    Some(match op {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        'Z' => 0,
        _ => return None,
    })
}

fn cubic_point(
    p0: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    p1: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    (
        u * u * u * p0.0 + 3.0 * u * u * t * c1.0 + 3.0 * u * t * t * c2.0 + t * t * t * p1.0,
        u * u * u * p0.1 + 3.0 * u * u * t * c1.1 + 3.0 * u * t * t * c2.1 + t * t * t * p1.1,
    )
}

fn quad_point(p0: (f64, f64), c: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    (
        u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p1.0,
        u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p1.1,
    )
}

/// Flatten parsed commands into subpath polylines.
///
/// Curves are subdivided into `curve_segments` line segments each; arcs
/// are rare in the bundled asset and are approximated by their chord.
/// Subpaths are returned open; the filler closes them implicitly.
pub fn flatten(commands: &[PathCommand], curve_segments: u32) -> Result<Vec<Vec<(f64, f64)>>> {
    let segments = curve_segments.max(1);
    let mut subpaths: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut pos = (0.0_f64, 0.0_f64);
    let mut subpath_start = (0.0_f64, 0.0_f64);
    // Second control of the last C/S and control of the last Q/T,
    // for smooth-command reflection
    let mut prev_cubic: Option<(f64, f64)> = None;
    let mut prev_quad: Option<(f64, f64)> = None;

    for command in commands {
        let relative = command.op.is_ascii_lowercase();
        let op = command.op.to_ascii_uppercase();
        let len = group_len(op).ok_or_else(|| {
            TaqwimError::PathData(format!("unsupported command '{}'", command.op))
        })?;

        if op == 'Z' {
            if !command.args.is_empty() {
                return Err(TaqwimError::PathData("close takes no arguments".into()));
            }
            if !current.is_empty() {
                subpaths.push(std::mem::take(&mut current));
            }
            pos = subpath_start;
            prev_cubic = None;
            prev_quad = None;
            continue;
        }

        if command.args.is_empty() || command.args.len() % len != 0 {
            return Err(TaqwimError::PathData(format!(
                "command '{}' takes arguments in groups of {len}, got {}",
                command.op,
                command.args.len()
            )));
        }

        for (index, group) in command.args.chunks(len).enumerate() {
            let base = if relative { pos } else { (0.0, 0.0) };
            match op {
                'M' => {
                    let p = (base.0 + group[0], base.1 + group[1]);
                    // only the first pair moves; the rest are implicit linetos
                    if index == 0 {
                        if !current.is_empty() {
                            subpaths.push(std::mem::take(&mut current));
                        }
                        subpath_start = p;
                    }
                    current.push(p);
                    pos = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'L' => {
                    let p = (base.0 + group[0], base.1 + group[1]);
                    if current.is_empty() {
                        current.push(pos);
                    }
                    current.push(p);
                    pos = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'H' => {
                    let p = (base.0 + group[0], pos.1);
                    if current.is_empty() {
                        current.push(pos);
                    }
                    current.push(p);
                    pos = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'V' => {
                    let p = (pos.0, base.1 + group[0]);
                    if current.is_empty() {
                        current.push(pos);
                    }
                    current.push(p);
                    pos = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'C' | 'S' => {
                    let (c1, rest) = if op == 'C' {
                        ((base.0 + group[0], base.1 + group[1]), &group[2..])
                    } else {
                        let reflected = match prev_cubic {
                            Some(c) => (2.0 * pos.0 - c.0, 2.0 * pos.1 - c.1),
                            None => pos,
                        };
                        (reflected, group)
                    };
                    let c2 = (base.0 + rest[0], base.1 + rest[1]);
                    let p = (base.0 + rest[2], base.1 + rest[3]);
                    if current.is_empty() {
                        current.push(pos);
                    }
                    for s in 1..=segments {
                        let t = f64::from(s) / f64::from(segments);
                        current.push(cubic_point(pos, c1, c2, p, t));
                    }
                    pos = p;
                    prev_cubic = Some(c2);
                    prev_quad = None;
                }
                'Q' | 'T' => {
                    let (c, rest) = if op == 'Q' {
                        ((base.0 + group[0], base.1 + group[1]), &group[2..])
                    } else {
                        let reflected = match prev_quad {
                            Some(c) => (2.0 * pos.0 - c.0, 2.0 * pos.1 - c.1),
                            None => pos,
                        };
                        (reflected, group)
                    };
                    let p = (base.0 + rest[0], base.1 + rest[1]);
                    if current.is_empty() {
                        current.push(pos);
                    }
                    for s in 1..=segments {
                        let t = f64::from(s) / f64::from(segments);
                        current.push(quad_point(pos, c, p, t));
                    }
                    pos = p;
                    prev_quad = Some(c);
                    prev_cubic = None;
                }
                'A' => {
                    let p = (base.0 + group[5], base.1 + group[6]);
                    if current.is_empty() {
                        current.push(pos);
                    }
                    current.push(p);
                    pos = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                _ => unreachable!("group_len filtered unknown commands"),
            }
        }
    }

    if !current.is_empty() {
        subpaths.push(current);
    }
    Ok(subpaths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(commands: &[PathCommand]) -> String {
        commands.iter().map(|c| c.op).collect()
    }

    #[test]
    fn parse_basic_commands() {
        let commands = parse_path_data("M0 0L10 0,10 10 0 10Z").unwrap();
        assert_eq!(ops(&commands), "MLZ");
        assert_eq!(commands[1].args, [10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
    }

    #[test]
    fn parse_compact_negative_numbers() {
        // path data elides separators before '-' and after '.'
        let commands = parse_path_data("M1.5-2.5l-3.25.75").unwrap();
        assert_eq!(commands[0].args, [1.5, -2.5]);
        assert_eq!(commands[1].args, [-3.25, 0.75]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_path_data("hello world").is_err());
        assert!(parse_path_data("M0 0 X 1 2").is_err());
        assert!(parse_path_data("").is_err());
    }

    #[test]
    fn flatten_square() {
        let commands = parse_path_data("M0 0L10 0 10 10 0 10Z").unwrap();
        let subpaths = flatten(&commands, 8).unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(
            subpaths[0],
            [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        );
    }

    #[test]
    fn flatten_relative_and_axis_commands() {
        let commands = parse_path_data("m10 10h5v5h-5z").unwrap();
        let subpaths = flatten(&commands, 8).unwrap();
        assert_eq!(
            subpaths[0],
            [(10.0, 10.0), (15.0, 10.0), (15.0, 15.0), (10.0, 15.0)]
        );
    }

    #[test]
    fn flatten_implicit_lineto_after_move() {
        let commands = parse_path_data("M0 0 10 0 10 10").unwrap();
        let subpaths = flatten(&commands, 8).unwrap();
        assert_eq!(subpaths[0], [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn flatten_cubic_hits_endpoint() {
        let commands = parse_path_data("M0 0C0 10 10 10 10 0").unwrap();
        let subpaths = flatten(&commands, 16).unwrap();
        let points = &subpaths[0];
        assert_eq!(points.len(), 17);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(*points.last().unwrap(), (10.0, 0.0));
        // curve midpoint of this symmetric bezier is (5, 7.5)
        let mid = points[8];
        assert!((mid.0 - 5.0).abs() < 1e-9 && (mid.1 - 7.5).abs() < 1e-9);
    }

    #[test]
    fn flatten_rejects_bad_arity() {
        let commands = parse_path_data("M0 0L1").unwrap();
        assert!(flatten(&commands, 8).is_err());
    }

    #[test]
    fn move_starts_new_subpath() {
        let commands = parse_path_data("M0 0L1 0M5 5L6 5").unwrap();
        let subpaths = flatten(&commands, 8).unwrap();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[1][0], (5.0, 5.0));
    }
}
