use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::StatsError;

/// Days per month used to turn the monthly total into a per-day estimate.
pub const DAYS_PER_MONTH: u64 = 30;

/// Parsed JSON payload of a single statistics-tool query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn parse(json: &str) -> Result<Self, StatsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    pub download_count: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Row {
    /// Returns the named field as display text. JSON null renders as `None`.
    pub fn field(&self, name: &str) -> Result<String, StatsError> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Null) => Ok("None".to_string()),
            Some(other) => Ok(other.to_string()),
            None => Err(StatsError::MissingField(name.to_string())),
        }
    }

    fn is_project(&self, package: &str) -> bool {
        matches!(self.fields.get("project"), Some(Value::String(p)) if p == package)
    }
}

/// 1-based position of the first row whose `project` equals `package`.
pub fn ranking(rows: &[Row], package: &str) -> Result<usize, StatsError> {
    rows.iter()
        .position(|row| row.is_project(package))
        .map(|i| i + 1)
        .ok_or_else(|| StatsError::PackageNotFound(package.to_string()))
}

/// Download count of the first row whose `project` equals `package`.
pub fn downloads(rows: &[Row], package: &str) -> Result<u64, StatsError> {
    rows.iter()
        .find(|row| row.is_project(package))
        .map(|row| row.download_count)
        .ok_or_else(|| StatsError::PackageNotFound(package.to_string()))
}

/// Axis along which a package's downloads are broken down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    OperatingSystem,
    Distro,
    PythonVersion,
    Country,
}

impl Dimension {
    /// Report order.
    pub const ALL: [Dimension; 4] = [
        Dimension::OperatingSystem,
        Dimension::Distro,
        Dimension::PythonVersion,
        Dimension::Country,
    ];

    /// Name passed to the statistics tool.
    pub fn query_name(self) -> &'static str {
        match self {
            Dimension::OperatingSystem => "system",
            Dimension::Distro => "distro",
            Dimension::PythonVersion => "pyversion",
            Dimension::Country => "country",
        }
    }

    /// Row field holding the dimension value.
    pub fn field(self) -> &'static str {
        match self {
            Dimension::OperatingSystem => "system_name",
            Dimension::Distro => "distro_name",
            Dimension::PythonVersion => "python_version",
            Dimension::Country => "country",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Dimension::OperatingSystem => "Operating systems",
            Dimension::Distro => "Distros",
            Dimension::PythonVersion => "Python versions",
            Dimension::Country => "Countries",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    pub monthly: u64,
    pub daily: u64,
    pub ranking: usize,
}

impl Overview {
    pub fn new(monthly: u64, ranking: usize) -> Self {
        Self {
            monthly,
            daily: monthly / DAYS_PER_MONTH,
            ranking,
        }
    }
}
