use crate::Arguments;
use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgMatches,
    Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const FEATURES_COMMAND_NAME: &str = "features";
const COMPARE_COMMAND_NAME: &str = "compare";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_subcommands(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_subcommands(command: Command) -> Command {
        let command = Self::register_features_command(command);
        Self::register_compare_command(command)
    }

    fn register_features_command(command: Command) -> Command {
        command.subcommand(Self::create_features_command())
    }

    fn register_compare_command(command: Command) -> Command {
        command.subcommand(Self::create_compare_command())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    fn create_features_command() -> Command {
        Command::new(FEATURES_COMMAND_NAME)
            .about("Compute skewness, kurtosis, entropy and chi-square goodness of fit of an image")
            .arg(Self::create_image_file_argument(
                "image_file",
                "Path to the image to analyze",
            ))
    }

    fn create_compare_command() -> Command {
        Command::new(COMPARE_COMMAND_NAME)
            .about("Compare the intensity histograms of two images")
            .arg(Self::create_image_file_argument(
                "first_image_file",
                "Path to the first image, whose histogram weights the chi-square distance",
            ))
            .arg(Self::create_image_file_argument(
                "second_image_file",
                "Path to the second image",
            ))
    }

    fn create_image_file_argument(id: &'static str, help: &'static str) -> Arg {
        Arg::new(id)
            .help(help)
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        match matches.subcommand() {
            Some((FEATURES_COMMAND_NAME, sub_matches)) => Arguments::Features {
                image_file: Self::extract_image_file_argument(sub_matches, "image_file"),
            },
            Some((COMPARE_COMMAND_NAME, sub_matches)) => Arguments::Compare {
                first_image_file: Self::extract_image_file_argument(
                    sub_matches,
                    "first_image_file",
                ),
                second_image_file: Self::extract_image_file_argument(
                    sub_matches,
                    "second_image_file",
                ),
            },
            _ => unreachable!("A subcommand is required"),
        }
    }

    fn extract_image_file_argument(matches: &ArgMatches, id: &str) -> PathBuf {
        matches
            .get_one::<PathBuf>(id)
            .expect("Required image file argument not provided")
            .clone()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::CLIParser;
    use crate::Arguments;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_image_file_argument() {
        let image_file_name = "testfile.png";
        let command = Command::new("test").arg(CLIParser::create_image_file_argument(
            "image_file",
            "test image",
        ));
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, image_file_name]);
        let image_file = CLIParser::extract_image_file_argument(&matches, "image_file");
        assert_eq!(image_file.file_name().unwrap(), image_file_name);
    }

    #[test]
    fn parse_features_command() {
        let mut cli_parser = CLIParser::default();
        let arguments =
            cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, "features", "/images/input.ppm"]);
        match arguments {
            Arguments::Features { image_file } => {
                assert_eq!(image_file.file_name().unwrap(), "input.ppm")
            }
            other => panic!("Expected features arguments, but got {:?}", other),
        }
    }

    #[test]
    fn parse_compare_command() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![
            PROGRAM_NAME_ARGUMENT,
            "compare",
            "/images/a.jpg",
            "/images/b.png",
        ]);
        match arguments {
            Arguments::Compare {
                first_image_file,
                second_image_file,
            } => {
                assert_eq!(
                    first_image_file.file_name().unwrap(),
                    "a.jpg",
                    "first image file does not match"
                );
                assert_eq!(
                    second_image_file.file_name().unwrap(),
                    "b.png",
                    "second image file does not match"
                );
            }
            other => panic!("Expected compare arguments, but got {:?}", other),
        }
    }

    #[test]
    fn parse_compare_command_with_missing_image() {
        let command = CLIParser::create_compare_command();
        let result = command.try_get_matches_from(vec!["compare", "/images/a.jpg"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        } else {
            panic!("Missing second image not detected");
        }
    }

    #[test]
    fn parse_unknown_command() {
        let command = CLIParser::register_subcommands(CLIParser::create_base_command());
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "filter", "a.png"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
        } else {
            panic!("Unknown subcommand not detected");
        }
    }
}
