//! Command-line arguments and sampling-domain parsing.

use std::path::PathBuf;

use clap::Parser;
use fsurf_core::{Domain, SamplerError};
use nom::{
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map_res, opt},
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};

/// Steps used when a domain string leaves them out
pub const DEFAULT_STEPS: usize = 40;

/// fsurf: shaded terminal viewer for z = f(x, y) surfaces.
#[derive(Parser, Debug)]
#[command(name = "fsurf-terminal", version, about)]
pub struct Args {
    /// Preset to show first (title or slug, e.g. "gaussian-hill").
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Preset function to resample over custom domains.
    #[arg(short, long, requires = "x_domain", requires = "y_domain")]
    pub function: Option<String>,

    /// Domain of the first input, as MIN:MAX[:STEPS].
    #[arg(long, value_parser = parse_domain, allow_hyphen_values = true)]
    pub x_domain: Option<Domain>,

    /// Domain of the second input, as MIN:MAX[:STEPS].
    #[arg(long, value_parser = parse_domain, allow_hyphen_values = true)]
    pub y_domain: Option<Domain>,

    /// Config file path.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// List the available presets and exit.
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CliError {
    #[error("invalid domain '{input}': expected MIN:MAX[:STEPS]")]
    Syntax { input: String },

    #[error("invalid domain '{input}': {source}")]
    Domain {
        input: String,
        #[source]
        source: SamplerError,
    },
}

/// Parse `MIN:MAX[:STEPS]`, e.g. `-3.14:3.14:45`.
pub fn parse_domain(input: &str) -> Result<Domain, CliError> {
    let (_, (min, max, steps)) = all_consuming(domain_parts)(input).map_err(|_| {
        CliError::Syntax {
            input: input.to_string(),
        }
    })?;

    Domain::new(min, max, steps.unwrap_or(DEFAULT_STEPS)).map_err(|source| CliError::Domain {
        input: input.to_string(),
        source,
    })
}

fn domain_parts(input: &str) -> IResult<&str, (f64, f64, Option<usize>)> {
    tuple((number, preceded(char(':'), number), opt(steps)))(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    delimited(multispace0, double, multispace0)(input)
}

fn steps(input: &str) -> IResult<&str, usize> {
    preceded(
        char(':'),
        delimited(multispace0, map_res(digit1, str::parse::<usize>), multispace0),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_domain() {
        let domain = parse_domain("-3.5:3.5:45").unwrap();
        assert_eq!(domain.min(), -3.5);
        assert_eq!(domain.max(), 3.5);
        assert_eq!(domain.steps(), 45);
    }

    #[test]
    fn test_parse_default_steps_and_spaces() {
        let domain = parse_domain(" 0 : 1e1 ").unwrap();
        assert_eq!(domain.min(), 0.0);
        assert_eq!(domain.max(), 10.0);
        assert_eq!(domain.steps(), DEFAULT_STEPS);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "1", "1:", "a:b", "1:2:x", "1:2:3:4", "1:2:-3"] {
            assert_eq!(
                parse_domain(input),
                Err(CliError::Syntax {
                    input: input.to_string()
                }),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_invalid_domain() {
        let err = parse_domain("0:1:0").unwrap_err();
        assert!(matches!(
            err,
            CliError::Domain {
                source: SamplerError::NoSteps,
                ..
            }
        ));
        assert!(parse_domain("inf:1").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "fsurf-terminal",
            "--function",
            "ripple-bowl",
            "--x-domain",
            "-2:2:10",
            "--y-domain",
            "-1:1",
        ])
        .unwrap();
        assert_eq!(args.function.as_deref(), Some("ripple-bowl"));
        assert_eq!(args.x_domain.unwrap().steps(), 10);
        assert_eq!(args.y_domain.unwrap().steps(), DEFAULT_STEPS);
        assert!(!args.list);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_args_log_file() {
        let args = Args::try_parse_from([
            "fsurf-terminal",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/fsurf.log",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/fsurf.log")));
    }

    #[test]
    fn test_function_requires_domains() {
        assert!(Args::try_parse_from(["fsurf-terminal", "--function", "ripple-bowl"]).is_err());
    }
}
