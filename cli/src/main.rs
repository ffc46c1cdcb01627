mod commands;
mod edit;
mod show;

use commands::*;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use figura::math::{Angle, Transform};
use figura::path::{FormatOptions, Path};
use figura::svg::{parse_chunks, parse_path, PathParser};
use log::{debug, error};

use std::fs::File;
use std::io::{self, stdin, stdout, Read};
use std::process;

fn main() {
    env_logger::init();

    let matches = Command::new("figura")
        .version(clap::crate_version!())
        .about("Inspects and edits SVG paths")
        .subcommand_required(true)
        .subcommand(
            Command::new("parse")
                .about("Parses a path and prints it back in a normalized form")
                .args(io_args())
                .args(format_args())
                .arg(
                    Arg::new("COUNT")
                        .short('c')
                        .long("count")
                        .help("Prints the number of splines and curves")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("bounds")
                .about("Prints the bounding box of a path as x_min y_min x_max y_max")
                .args(io_args()),
        )
        .subcommand(
            Command::new("split")
                .about("Splits a path in two at a parameter in [0, 1]")
                .args(io_args())
                .args(format_args())
                .arg(parameter_arg())
                .arg(
                    Arg::new("SUBDIVIDE")
                        .long("subdivide")
                        .help("Prints a single path with the curve at the parameter split in two")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("lerp")
                .about("Interpolates between two paths")
                .args(io_args())
                .args(format_args())
                .arg(parameter_arg())
                .arg(
                    Arg::new("TO")
                        .long("to")
                        .value_name("PATH")
                        .help("The path to interpolate to")
                        .required(true),
                )
                .arg(
                    Arg::new("STEPS")
                        .long("steps")
                        .value_name("STEPS")
                        .help("Prints STEPS + 1 evenly spaced frames instead of a single one")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("transform")
                .about("Rotates, scales then translates a path")
                .args(io_args())
                .args(format_args())
                .arg(
                    Arg::new("ROTATE")
                        .long("rotate")
                        .value_name("DEGREES")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("SCALE")
                        .long("scale")
                        .value_name("X,Y")
                        .allow_hyphen_values(true)
                        .help("Scale factors, or a single uniform factor"),
                )
                .arg(
                    Arg::new("TRANSLATE")
                        .long("translate")
                        .value_name("X,Y")
                        .allow_hyphen_values(true),
                ),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some(("parse", matches)) => show::show(ShowCmd {
            path: get_path(matches)?,
            output: get_output(matches)?,
            format: get_format(matches),
            count: matches.get_flag("COUNT"),
        }),
        Some(("bounds", matches)) => show::bounds(BoundsCmd {
            path: get_path(matches)?,
            output: get_output(matches)?,
        }),
        Some(("split", matches)) => edit::split(SplitCmd {
            path: get_path(matches)?,
            output: get_output(matches)?,
            format: get_format(matches),
            at: get_parameter(matches),
            subdivide: matches.get_flag("SUBDIVIDE"),
        }),
        Some(("lerp", matches)) => {
            let to = matches
                .get_one::<String>("TO")
                .map(String::as_str)
                .unwrap_or_default();
            edit::lerp(LerpCmd {
                from: get_path(matches)?,
                to: parse(to)?,
                output: get_output(matches)?,
                format: get_format(matches),
                at: get_parameter(matches),
                steps: matches.get_one::<usize>("STEPS").copied(),
            })
        }
        Some(("transform", matches)) => edit::transform(TransformCmd {
            path: get_path(matches)?,
            output: get_output(matches)?,
            format: get_format(matches),
            transform: get_transform(matches)?,
        }),
        _ => Ok(()),
    }
}

fn io_args() -> [Arg; 3] {
    [
        Arg::new("PATH")
            .value_name("PATH")
            .help("An SVG path")
            .required(false),
        Arg::new("INPUT")
            .help("Reads the path from a file, or from stdin if neither PATH nor FILE is set")
            .short('i')
            .long("input")
            .value_name("FILE"),
        Arg::new("OUTPUT")
            .help("Sets the output file to use")
            .short('o')
            .long("output")
            .value_name("FILE"),
    ]
}

fn format_args() -> [Arg; 2] {
    [
        Arg::new("PRECISION")
            .short('p')
            .long("precision")
            .value_name("DIGITS")
            .help("Rounds coordinates to DIGITS decimals")
            .value_parser(value_parser!(usize)),
        Arg::new("RELATIVE")
            .short('r')
            .long("relative")
            .help("Writes relative commands")
            .action(ArgAction::SetTrue),
    ]
}

fn parameter_arg() -> Arg {
    Arg::new("AT")
        .short('u')
        .long("at")
        .value_name("U")
        .help("Parameter in [0, 1] (0.5 by default)")
        .value_parser(value_parser!(f64))
}

fn parse(src: &str) -> Result<Path, CliError> {
    Ok(parse_path(src)?)
}

fn get_path(matches: &ArgMatches) -> Result<Path, CliError> {
    if let Some(src) = matches.get_one::<String>("PATH") {
        return parse(src);
    }

    let mut reader: Box<dyn Read> = match matches.get_one::<String>("INPUT") {
        Some(file_name) => Box::new(File::open(file_name)?),
        None => Box::new(stdin()),
    };

    // The parser resumes where each line stopped.
    let mut src = String::new();
    reader.read_to_string(&mut src)?;
    let path = parse_chunks(PathParser::new(), src.split_inclusive('\n'))?;
    debug!("Parsed {} splines", path.len());

    Ok(path)
}

fn get_output(matches: &ArgMatches) -> Result<Box<dyn io::Write>, CliError> {
    match matches.get_one::<String>("OUTPUT") {
        Some(file_name) => Ok(Box::new(File::create(file_name)?)),
        None => Ok(Box::new(stdout())),
    }
}

fn get_format(matches: &ArgMatches) -> FormatOptions {
    let mut format = FormatOptions::DEFAULT.with_relative(matches.get_flag("RELATIVE"));
    if let Some(precision) = matches.get_one::<usize>("PRECISION") {
        format = format.with_precision(*precision);
    }

    format
}

fn get_parameter(matches: &ArgMatches) -> f64 {
    matches.get_one::<f64>("AT").copied().unwrap_or(0.5)
}

fn get_transform(matches: &ArgMatches) -> Result<Transform, CliError> {
    let mut transform = Transform::identity();

    if let Some(degrees) = matches.get_one::<f64>("ROTATE") {
        transform = transform.then_rotate(Angle::degrees(*degrees));
    }

    if let Some(src) = matches.get_one::<String>("SCALE") {
        let scale = match src.parse::<f64>() {
            Ok(s) => (s, s),
            Err(_) => {
                let v = parse_pair(src).map_err(|_| CliError::Argument {
                    name: "scale",
                    src: src.clone(),
                })?;
                (v.x, v.y)
            }
        };
        transform = transform.then_scale(scale.0, scale.1);
    }

    if let Some(src) = matches.get_one::<String>("TRANSLATE") {
        let offset = parse_pair(src).map_err(|_| CliError::Argument {
            name: "translate",
            src: src.clone(),
        })?;
        transform = transform.then_translate(offset);
    }

    Ok(transform)
}
