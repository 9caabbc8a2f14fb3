use super::*;

#[test]
fn ingest_defaults_to_weekly_window() {
    let cli = Cli::try_parse_from(["movie-review", "ingest"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Ingest { window: TrendingWindow::Week })));
}

#[test]
fn ingest_accepts_daily_window() {
    let cli = Cli::try_parse_from(["movie-review", "ingest", "--window", "day"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Ingest { window: TrendingWindow::Day })));
}

#[test]
fn no_subcommand_means_serve() {
    let cli = Cli::try_parse_from(["movie-review"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn unknown_window_is_rejected() {
    assert!(Cli::try_parse_from(["movie-review", "ingest", "--window", "month"]).is_err());
}
