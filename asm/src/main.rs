use color_print::cprintln;
use hex8as::{encode, hexfmt, label, parser, util, AsmError, Config, Error, HexCase};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input assembly file
    input: String,

    /// Output hex file
    #[clap(short, long, default_value = "a.hex")]
    output: String,

    /// YAML config file (command line options take precedence)
    #[clap(short, long)]
    config: Option<String>,

    /// Address of the first word
    #[clap(long)]
    origin: Option<u8>,

    /// Treat label names case-insensitively
    #[clap(short, long)]
    ignore_case: bool,

    /// Comment marker
    #[clap(long)]
    comment: Option<char>,

    /// Write lower case hex digits
    #[clap(long)]
    lower: bool,

    /// Bytes per line of output
    #[clap(short, long)]
    bytes_per_line: Option<usize>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// Only print errors
    #[clap(short, long)]
    quiet: bool,
}

macro_rules! progress {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            println!($($arg)*);
        }
    };
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    if let Err(err) = run(&args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn config(args: &Args) -> Result<Config, Error> {
    let cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Ok(args.apply(cfg))
}

impl Args {
    /// Overrides `cfg` with every option given on the command line.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(origin) = self.origin {
            cfg.origin = origin;
        }
        if self.ignore_case {
            cfg.case_sensitive_labels = false;
        }
        if let Some(marker) = self.comment {
            cfg.comment_marker = marker;
        }
        if self.lower {
            cfg.hex_case = HexCase::Lower;
        }
        if let Some(n) = self.bytes_per_line {
            cfg.bytes_per_line = n;
        }
        cfg
    }
}

fn run(args: &Args) -> Result<(), Error> {
    use std::io::Write;

    let cfg = config(args)?;
    progress!(args.quiet, "Hex8 Assembler");

    progress!(args.quiet, "1. Read File and Parse Lines");
    progress!(args.quiet, "  < {}", args.input);
    let src = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::FileRead(args.input.clone(), e))?;
    let raw: Vec<&str> = src.lines().collect();
    let report = |errors: Vec<AsmError>| {
        for err in &errors {
            err.print_diag(&args.input, &raw);
        }
        Error::Aborted(errors.len())
    };

    let lines = parser::parse(&src, &cfg).map_err(report)?;

    progress!(args.quiet, "2. Collect Labels");
    let (labels, lines) = label::collect(&lines, &cfg).map_err(|err| report(vec![err]))?;
    progress!(args.quiet, "  - found #{} labels", labels.len());

    progress!(args.quiet, "3. Resolve Labels & Encode");
    let words = encode::encode(&lines, &labels).map_err(report)?;
    progress!(args.quiet, "  - {} words", words.len());

    if args.dump {
        print!("{}", util::dump(&args.input, &src, &lines, &labels));
    }

    progress!(args.quiet, "4. Write Hex Image");
    progress!(args.quiet, "  > {}", args.output);
    let mut file = std::fs::File::create(&args.output)
        .map_err(|e| Error::FileCreate(args.output.clone(), e))?;
    file.write_all(hexfmt::format(&words, &cfg).as_bytes())
        .map_err(|e| Error::FileWrite(args.output.clone(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const FILE: &str = "origin: 9\ncase_sensitive_labels: true\ncomment_marker: '!'\nhex_case: upper\nbytes_per_line: 2\n";

    fn from_file() -> Config {
        serde_yaml::from_str(FILE).unwrap()
    }

    #[test]
    fn flags_override_file() {
        let args = Args::parse_from([
            "hex8as", "--origin", "3", "-i", "--comment", "#", "--lower", "-b", "4", "in.s",
        ]);
        let cfg = args.apply(from_file());
        assert_eq!(cfg.origin, 3);
        assert!(!cfg.case_sensitive_labels);
        assert_eq!(cfg.comment_marker, '#');
        assert_eq!(cfg.hex_case, HexCase::Lower);
        assert_eq!(cfg.bytes_per_line, 4);
    }

    #[test]
    fn file_values_kept_without_flags() {
        let args = Args::parse_from(["hex8as", "in.s"]);
        assert_eq!(args.apply(from_file()), from_file());
        assert_eq!(args.apply(Config::default()), Config::default());
    }

    #[test]
    fn flags_override_only_what_they_name() {
        let args = Args::parse_from(["hex8as", "--origin", "0", "in.s"]);
        let cfg = args.apply(from_file());
        assert_eq!(cfg.origin, 0);
        assert_eq!(cfg.comment_marker, '!');
        assert_eq!(cfg.bytes_per_line, 2);
    }
}
