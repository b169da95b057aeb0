// SPDX-License-Identifier: MPL-2.0
use sales_lens::app::{self, paths, Flags};

const HELP: &str = "\
Sales ML Analyzer dashboard

USAGE:
  sales_lens [OPTIONS]

OPTIONS:
  --lang <id>               UI language (en-US, id)
  --config-dir <dir>        Directory holding settings.toml
  --data-dir <dir>          Directory receiving diagnostic reports
  --flash <category:text>   Show a banner on startup (repeatable);
                            category is success, error, warning or info
  -h, --help                Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        flashes: args.values_from_str("--flash")?,
    };

    let rest = args.finish();
    if let Some(unknown) = rest.first() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument {}", unknown.to_string_lossy()),
        });
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(values: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(values.iter().map(OsString::from).collect())
    }

    #[test]
    fn parses_language_and_repeated_flashes() {
        let flags = parse_flags(args(&[
            "--lang",
            "id",
            "--flash",
            "success:Berhasil memuat 120 data dari CSV",
            "--flash",
            "warning:Belum ada data diupload.",
        ]))
        .expect("valid arguments");

        assert_eq!(flags.lang.as_deref(), Some("id"));
        assert_eq!(flags.flashes.len(), 2);
        assert!(flags.config_dir.is_none());
    }

    #[test]
    fn rejects_unknown_arguments() {
        let err = parse_flags(args(&["--verbose"])).expect_err("unknown flag");
        assert!(matches!(err, pico_args::Error::ArgumentParsingFailed { .. }));
    }
}
