#[cfg(test)]
mod tests {
    use clap::Parser;
    use how_shell_cli::cli_args::Args;
    use how_shell_cli::commands::execute;
    use std::io::Write;
    use std::process::Command;
    use tempfile::NamedTempFile;

    /// An empty config file, so tests never pick up the user's own settings
    fn empty_config() -> NamedTempFile {
        NamedTempFile::new().unwrap()
    }

    fn select_args(config: &NamedTempFile, terminal: &NamedTempFile, script: &str) -> Vec<String> {
        [
            "how-shell",
            "--config-path",
            config.path().to_str().unwrap(),
            "select",
            "--program",
            "sh",
            "--terminal",
            terminal.path().to_str().unwrap(),
            "--",
            "-c",
            script,
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    #[test]
    fn test_select_prints_line_and_status() {
        let config = empty_config();
        let terminal = NamedTempFile::new().unwrap();
        let args = Args::parse_from(select_args(&config, &terminal, "printf 'X\\n'"));

        let mut out = Vec::new();
        let status = execute(&args, &mut out).unwrap();

        assert_eq!(status, 0);
        assert_eq!(out, b"X\n");
    }

    #[test]
    fn test_select_failure() {
        let config = empty_config();
        let terminal = NamedTempFile::new().unwrap();
        let args = Args::parse_from(select_args(&config, &terminal, "exit 9"));

        let mut out = Vec::new();
        let status = execute(&args, &mut out).unwrap();

        assert_eq!(status, 9);
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_select_uses_config_file_program() {
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "program: sh").unwrap();
        let terminal = NamedTempFile::new().unwrap();

        let args = Args::parse_from([
            "how-shell",
            "-c",
            config.path().to_str().unwrap(),
            "select",
            "-t",
            terminal.path().to_str().unwrap(),
            "--",
            "-c",
            "echo configured",
        ]);

        let mut out = Vec::new();
        assert_eq!(execute(&args, &mut out).unwrap(), 0);
        assert_eq!(out, b"configured\n");
    }

    #[test]
    fn test_init_uses_keybinding_flag() {
        let config = empty_config();
        let args = Args::parse_from([
            "how-shell",
            "-c",
            config.path().to_str().unwrap(),
            "init",
            "zsh",
            "-k",
            "^O",
        ]);

        let mut out = Vec::new();
        assert_eq!(execute(&args, &mut out).unwrap(), 0);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("bindkey '^O' __how_shell_widget"));
        assert!(script.contains("select --program how --terminal /dev/tty --"));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args = Args::parse_from([
            "how-shell",
            "-c",
            "/nonexistent/how-shell/config.yml",
            "init",
            "bash",
        ]);

        let mut out = Vec::new();
        assert!(execute(&args, &mut out).is_err());
        assert!(out.is_empty());
    }

    /// The binary itself exits with the lookup tool's status
    #[test]
    fn test_binary_propagates_exit_status() {
        let config = empty_config();
        let terminal = NamedTempFile::new().unwrap();
        let args = select_args(&config, &terminal, "printf 'ls -la\\n'; exit 42");

        let output = Command::new(env!("CARGO_BIN_EXE_how-shell"))
            .args(&args[1..])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(42));
        assert_eq!(output.stdout, b"ls -la\n");
    }

    #[test]
    fn test_binary_reports_errors_on_stderr() {
        let output = Command::new(env!("CARGO_BIN_EXE_how-shell"))
            .args(["-c", "/nonexistent/how-shell/config.yml", "init", "zsh"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("config"));
    }
}
