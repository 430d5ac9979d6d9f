use tracing::info;

use crate::config::Settings;
use crate::error::StatsError;
use crate::runner::CommandRunner;
use crate::stats::{self, Dimension, Overview, QueryResult, Row};

/// Builds statistics-tool invocations and interprets their JSON output.
pub struct StatsClient<R> {
    runner: R,
    settings: Settings,
}

impl<R: CommandRunner> StatsClient<R> {
    pub fn new(runner: R, settings: Settings) -> Self {
        Self { runner, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Shell command listing every project's downloads, ranked.
    pub fn top_packages_command(&self) -> String {
        let days = self.settings.days.to_string();
        let limit = self.settings.limit.to_string();
        shell_words::join([
            self.settings.tool.as_str(),
            "--all",
            "--json",
            "--days",
            days.as_str(),
            "--limit",
            limit.as_str(),
            "",
            "project",
        ])
    }

    /// Shell command breaking the package's downloads down by `dimension`.
    pub fn dimension_command(&self, dimension: Dimension) -> String {
        let days = self.settings.days.to_string();
        shell_words::join([
            self.settings.tool.as_str(),
            "--json",
            "--days",
            days.as_str(),
            self.settings.package.as_str(),
            dimension.query_name(),
        ])
    }

    pub fn top_packages(&mut self) -> Result<QueryResult, StatsError> {
        let command = self.top_packages_command();
        QueryResult::parse(&self.runner.run(&command)?)
    }

    pub fn ranking(&mut self) -> Result<usize, StatsError> {
        let top = self.top_packages()?;
        stats::ranking(&top.rows, &self.settings.package)
    }

    pub fn downloads(&mut self) -> Result<u64, StatsError> {
        let top = self.top_packages()?;
        stats::downloads(&top.rows, &self.settings.package)
    }

    pub fn overview(&mut self) -> Result<Overview, StatsError> {
        let overview = Overview::new(self.downloads()?, self.ranking()?);
        info!(action = "computed", component = "overview", monthly = overview.monthly, daily = overview.daily, ranking = overview.ranking, "Overview computed");
        Ok(overview)
    }

    pub fn downloads_by(&mut self, dimension: Dimension) -> Result<Vec<Row>, StatsError> {
        let command = self.dimension_command(dimension);
        let result = QueryResult::parse(&self.runner.run(&command)?)?;
        if result.rows.is_empty() {
            return Err(StatsError::PackageNotFound(self.settings.package.clone()));
        }
        info!(action = "fetched", component = "breakdown", dimension = dimension.query_name(), row_count = result.rows.len(), "Breakdown fetched");
        Ok(result.rows)
    }

    pub fn downloads_by_system(&mut self) -> Result<Vec<Row>, StatsError> {
        self.downloads_by(Dimension::OperatingSystem)
    }

    pub fn downloads_by_distro(&mut self) -> Result<Vec<Row>, StatsError> {
        self.downloads_by(Dimension::Distro)
    }

    pub fn downloads_by_pyversion(&mut self) -> Result<Vec<Row>, StatsError> {
        self.downloads_by(Dimension::PythonVersion)
    }

    pub fn downloads_by_country(&mut self) -> Result<Vec<Row>, StatsError> {
        self.downloads_by(Dimension::Country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::ScriptedRunner;
    use crate::runner::CachedRunner;

    const TOP: &str = r#"{"rows": [
        {"project": "boto3", "download_count": 900000000},
        {"project": "psutil", "download_count": 3000000}
    ]}"#;

    fn settings() -> Settings {
        Settings::with_auth_file("/home/user/.pypinfo.json")
    }

    #[test]
    fn test_command_lines() {
        let client = StatsClient::new(ScriptedRunner::default(), settings());
        assert_eq!(
            client.top_packages_command(),
            "pypinfo --all --json --days 30 --limit 100 '' project"
        );
        assert_eq!(
            client.dimension_command(Dimension::PythonVersion),
            "pypinfo --json --days 30 psutil pyversion"
        );
        assert_eq!(
            client.dimension_command(Dimension::OperatingSystem),
            "pypinfo --json --days 30 psutil system"
        );
    }

    #[test]
    fn test_command_lines_quote_user_values() {
        let settings = Settings {
            tool: "/opt/stats tools/pypinfo".to_string(),
            package: "x; touch pwned; echo".to_string(),
            ..settings()
        };
        let client = StatsClient::new(ScriptedRunner::default(), settings);
        assert_eq!(
            client.top_packages_command(),
            "'/opt/stats tools/pypinfo' --all --json --days 30 --limit 100 '' project"
        );
        assert_eq!(
            client.dimension_command(Dimension::OperatingSystem),
            "'/opt/stats tools/pypinfo' --json --days 30 'x; touch pwned; echo' system"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_quoted_command_runs_tool_path_with_spaces() {
        use crate::runner::ShellRunner;
        use std::fs;

        let dir = std::env::temp_dir().join(format!("pkgstats tool {}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let tool = dir.join("fake pypinfo");
        std::os::unix::fs::symlink("/bin/echo", &tool).unwrap();
        let marker = dir.join("pwned");

        let settings = Settings {
            tool: tool.to_string_lossy().into_owned(),
            package: format!("x; touch '{}'; echo", marker.display()),
            ..settings()
        };
        let client = StatsClient::new(ShellRunner::new("/tmp/creds.json"), settings);
        let command = client.dimension_command(Dimension::OperatingSystem);

        let mut runner = ShellRunner::new("/tmp/creds.json");
        let out = runner.run(&command).unwrap();
        assert_eq!(
            out,
            format!("--json --days 30 x; touch '{}'; echo system", marker.display())
        );
        assert!(!marker.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_overview_runs_top_packages_once() {
        let top_cmd = "pypinfo --all --json --days 30 --limit 100 '' project";
        let runner = CachedRunner::new(ScriptedRunner::default().respond(top_cmd, TOP));
        let mut client = StatsClient::new(runner, settings());

        let overview = client.overview().unwrap();
        assert_eq!(overview, Overview::new(3_000_000, 2));
        assert_eq!(overview.daily, 100_000);
        assert_eq!(client.runner().inner().count(top_cmd), 1);
    }

    #[test]
    fn test_package_outside_limit_is_not_found() {
        let top_cmd = "pypinfo --all --json --days 30 --limit 100 '' project";
        let runner = ScriptedRunner::default().respond(top_cmd, r#"{"rows": []}"#);
        let mut client = StatsClient::new(runner, settings());
        assert!(matches!(client.ranking(), Err(StatsError::PackageNotFound(ref p)) if p == "psutil"));
        assert!(matches!(client.downloads(), Err(StatsError::PackageNotFound(_))));
    }

    #[test]
    fn test_breakdown_keeps_provider_order() {
        let runner = ScriptedRunner::default().respond(
            "pypinfo --json --days 30 psutil country",
            r#"{"rows": [
                {"country": "US", "download_count": 10},
                {"country": "CN", "download_count": 20}
            ]}"#,
        );
        let mut client = StatsClient::new(runner, settings());
        let rows = client.downloads_by_country().unwrap();
        let countries: Vec<_> = rows.iter().map(|r| r.field("country").unwrap()).collect();
        assert_eq!(countries, ["US", "CN"]);
    }

    #[test]
    fn test_empty_breakdown_is_not_found() {
        let runner = ScriptedRunner::default()
            .respond("pypinfo --json --days 30 psutil distro", r#"{"rows": []}"#);
        let mut client = StatsClient::new(runner, settings());
        assert!(matches!(
            client.downloads_by_distro(),
            Err(StatsError::PackageNotFound(_))
        ));
    }

    #[test]
    fn test_tool_failure_propagates_stderr() {
        let runner = ScriptedRunner::default()
            .fail("pypinfo --json --days 30 psutil system", "credentials missing");
        let mut client = StatsClient::new(runner, settings());
        let err = client.downloads_by_system().unwrap_err();
        assert_eq!(err.to_string(), "credentials missing");
    }
}
