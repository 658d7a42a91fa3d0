use clap::{arg, Arg, Command};
use crate::global_settings::GlobalSettings;

fn asset_kind_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name("KIND")
        .help(help)
        .required(true)
        .value_parser(clap::builder::PossibleValuesParser::new(
            purse_lib::asset_kinds::AssetKind::ALL.map(|k| k.name()),
        ))
        .ignore_case(true)
}

pub(crate) fn build_cli() -> Command {
    Command::new("purse")
        .version("0.1")
        .about("Check which transactions are allowed between your accounts")
        .subcommand_required(true)
        .subcommand_precedence_over_arg(true) // --x val1 val2 subcommand
        .flatten_help(true) // show help for all subcommands
        .arg_required_else_help(true) // show full help if nothing given
        .args(GlobalSettings::cli())
        .subcommand(
            Command::new("classify")
                .about(
                    "Show the kind of transaction when money flows from \
                     ACCOUNT to PARTNER",
                )
                .arg(asset_kind_arg("account", "Kind of the paying account"))
                .arg(asset_kind_arg("partner", "Kind of the receiving account")),
        )
        .subcommand(
            Command::new("kinds")
                .about("Show all category kinds and how they are interpreted"),
        )
        .subcommand(
            Command::new("check")
                .about("Check all accounts and transactions in a scenario file")
                .arg(arg!(<FILE> "JSON file describing the scenario"))
                .arg(arg!(--"auto-correct" "Raise age allowances before checking")),
        )
        .subcommand(
            // Use    eval "$(purse completions zsh)"
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("The shell to generate the completions for")
                        .required(true)
                        .value_parser(clap::builder::EnumValueParser::<
                            clap_complete_command::Shell,
                        >::new()),
                ),
        )
}

#[cfg(test)]
mod test {
    use crate::args::build_cli;

    #[test]
    fn test_cli() {
        build_cli().debug_assert();

        let m = build_cli()
            .try_get_matches_from(["purse", "-vv", "classify", "deposit", "Payee"])
            .unwrap();
        assert_eq!(m.get_count("verbose"), 2);
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "classify");
        assert_eq!(
            sub.get_one::<String>("account").map(String::as_str),
            Some("deposit")
        );

        assert!(build_cli()
            .try_get_matches_from(["purse", "classify", "bank", "payee"])
            .is_err());
    }
}
