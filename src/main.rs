use civilcal::{CivilDate, CivilTime, CompositeError, FormatError};
use clap::{Args, Parser, Subcommand};
use core::str::FromStr;

/// Parses `input` as the JSON form if it starts with a quote, else as the bare text form.
fn parse_input<T>(
    input: &str,
    from_json: fn(&[u8]) -> Result<T, FormatError>,
) -> Result<T, FormatError>
where
    T: FromStr<Err = FormatError>,
{
    if input.starts_with('"') {
        from_json(input.as_bytes())
    } else {
        input.parse()
    }
}

#[derive(Args, Debug)]
struct OutputArg {
    /// Print the JSON encoding instead of the bare text.
    #[arg(long)]
    json: bool,
}

impl OutputArg {
    fn render(&self, text: String, json: Vec<u8>) -> String {
        if self.json {
            String::from_utf8_lossy(&json).into_owned()
        } else {
            text
        }
    }
}

/// Offsets added to a date. Each may be negative.
#[derive(Args, Debug)]
struct OffsetArg {
    /// Years to add.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    years: i32,

    /// Months to add. The day rolls over if the resulting month is too short.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    months: i32,

    /// Days to add.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    days: i32,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a `YYYY-MM-DD` date (or its JSON string), optionally shifts it, and prints it.
    Date {
        /// The date, as `YYYY-MM-DD` or `"YYYY-MM-DD"`
        value: String,

        #[command(flatten)]
        offset: OffsetArg,

        #[command(flatten)]
        output: OutputArg,
    },

    /// Parses a `HH:MM:SS` time (or its JSON string) and prints it.
    Time {
        /// The time, as `HH:MM:SS` or `"HH:MM:SS"`
        value: String,

        #[command(flatten)]
        output: OutputArg,
    },

    /// Compares two dates and prints `before`, `after` or `equal`.
    Cmp {
        /// The date on the left-hand side
        a: String,

        /// The date on the right-hand side
        b: String,
    },
}

type Output = (String, i32);

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn do_work(cli: Cli) -> Result<Output, CompositeError> {
    match cli.command {
        Commands::Date {
            value,
            offset,
            output,
        } => {
            let date = parse_input(&value, CivilDate::from_json)?.add_date(
                offset.years,
                offset.months,
                offset.days,
            );
            Ok((output.render(date.to_string(), date.to_json()), 0))
        }
        Commands::Time { value, output } => {
            let time = parse_input(&value, CivilTime::from_json)?;
            Ok((output.render(time.to_string(), time.to_json()), 0))
        }
        Commands::Cmp { a, b } => {
            let a = parse_input(&a, CivilDate::from_json)?;
            let b = parse_input(&b, CivilDate::from_json)?;
            let relation = if a.before(&b) {
                "before"
            } else if a.after(&b) {
                "after"
            } else {
                "equal"
            };
            Ok((relation.to_string(), 0))
        }
    }
}
