//! Tests for command-line parsing and headless session playback

#[cfg(test)]
mod tests {
    use blastgrid::io::cli::{Cli, SessionRunner};
    use blastgrid::io::configuration::{
        DEFAULT_COLORS, DEFAULT_COLUMNS, DEFAULT_MIN_GROUP_SIZE, DEFAULT_ROWS, DEFAULT_SEED,
        DEFAULT_SESSIONS, DEFAULT_TURNS,
    };
    use clap::Parser;
    use std::path::PathBuf;

    // Tests CLI parsing with no arguments uses defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.rows, DEFAULT_ROWS);
        assert_eq!(cli.columns, DEFAULT_COLUMNS);
        assert_eq!(cli.colors, DEFAULT_COLORS);
        assert_eq!(cli.min_group, DEFAULT_MIN_GROUP_SIZE);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.turns, DEFAULT_TURNS);
        assert_eq!(cli.sessions, DEFAULT_SESSIONS);
        assert_eq!(cli.output, None);
        assert!(!cli.quiet);
    }

    // Tests CLI parsing with all available arguments
    // Verified by swapping short flags between fields
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program", "-r", "6", "-c", "7", "-k", "3", "-m", "3", "-a", "9", "-s", "123", "-t",
            "50", "-n", "4", "-o", "boards", "-q",
        ]);

        assert_eq!(cli.rows, 6);
        assert_eq!(cli.columns, 7);
        assert_eq!(cli.colors, 3);
        assert_eq!(cli.min_group, 3);
        assert_eq!(cli.shuffle_attempts, 9);
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.turns, 50);
        assert_eq!(cli.sessions, 4);
        assert_eq!(cli.output, Some(PathBuf::from("boards")));
        assert!(cli.quiet);
    }

    // Tests engine configuration mirrors the arguments
    // Verified by passing the base seed to every session
    #[test]
    fn test_engine_config_and_session_seeds() {
        let cli = Cli::parse_from(["program", "--rows", "5", "--colors", "2", "--seed", "10"]);

        let config = cli.engine_config(cli.session_seed(3));
        assert_eq!(config.rows, 5);
        assert_eq!(config.color_count, 2);
        assert_eq!(config.seed, 13);
        assert!(!config.hold_until_released);
        assert_eq!(
            Cli::parse_from(["program", "-s", "18446744073709551615"]).session_seed(1),
            0
        );
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(Cli::parse_from(["program"]).should_show_progress());
        assert!(!Cli::parse_from(["program", "--quiet"]).should_show_progress());
    }

    // Tests sessions play reproducibly and keep the board full
    // Verified by seeding the automatic player from entropy
    #[test]
    fn test_sessions_are_reproducible() {
        let args = ["program", "-r", "6", "-c", "6", "-k", "3", "-t", "40", "-n", "2", "-q"];

        let first = SessionRunner::new(Cli::parse_from(args))
            .run()
            .expect("sessions play");
        let second = SessionRunner::new(Cli::parse_from(args))
            .run()
            .expect("sessions play");

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].seed, DEFAULT_SEED);
        assert_eq!(first[1].seed, DEFAULT_SEED + 1);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.stats, b.stats);
            assert_eq!(a.turns_played, b.turns_played);
            assert!(a.turns_played <= 40);
            assert_eq!(
                a.stats.selections_accepted + a.stats.selections_rejected,
                a.turns_played
            );
            assert!(a.image_path.is_none());
        }
    }

    // Tests an output directory receives one image per session
    // Verified by skipping the export step
    #[test]
    fn test_session_exports_board() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("boards");
        let output_arg = output.to_string_lossy().to_string();

        let reports = SessionRunner::new(Cli::parse_from([
            "program", "-r", "4", "-c", "4", "-t", "5", "-q", "-o", output_arg.as_str(),
        ]))
        .run()
        .expect("session plays");

        let path = reports[0].image_path.clone().expect("image requested");
        assert_eq!(path, output.join(format!("board_{DEFAULT_SEED}.png")));
        assert!(path.exists());
    }

    // Tests an invalid board configuration aborts the run
    // Verified by clamping the color count instead of rejecting it
    #[test]
    fn test_invalid_configuration_errors() {
        let result = SessionRunner::new(Cli::parse_from(["program", "-k", "9", "-q"])).run();
        assert!(result.is_err());
    }
}
