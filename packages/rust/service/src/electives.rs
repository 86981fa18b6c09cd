//! Rule-based elective recommendations.
//!
//! The table is static: it does not depend on the extracted curricula.
//! Role resolution looks at the target role first (table order), then falls
//! back to keywords in the stated background.

/// Recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleBucket {
    MlEngineer,
    DataEngineer,
    Product,
    Research,
}

/// Maximum number of electives in one recommendation.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Separator between background and target role in a request.
const ROLE_DELIMITER: &str = "->";

/// Background keyword stems checked in order when the target role matches no
/// table row. No match falls back to [`RoleBucket::MlEngineer`].
const BACKGROUND_RULES: &[(&[&str], RoleBucket)] = &[
    (&["math", "theory"], RoleBucket::Research),
    (&["product", "pm"], RoleBucket::Product),
    (&["engineer", "dev"], RoleBucket::MlEngineer),
];

/// One row of the [`ElectiveTable`].
#[derive(Debug, Clone)]
pub struct RoleEntry {
    pub bucket: RoleBucket,
    /// Label such as `ml engineer`; its first word is the match key.
    pub label: String,
    pub electives: Vec<String>,
}

impl RoleEntry {
    fn new(bucket: RoleBucket, label: &str, electives: &[&str]) -> Self {
        Self {
            bucket,
            label: label.to_string(),
            electives: electives.iter().map(|e| (*e).to_string()).collect(),
        }
    }

    fn leading_word(&self) -> &str {
        self.label.split_whitespace().next().unwrap_or(&self.label)
    }
}

/// Ordered role → electives table.
#[derive(Debug, Clone)]
pub struct ElectiveTable {
    entries: Vec<RoleEntry>,
}

impl Default for ElectiveTable {
    fn default() -> Self {
        Self::new(vec![
            RoleEntry::new(
                RoleBucket::MlEngineer,
                "ml engineer",
                &["MLOps", "ML System Design", "Optimization Methods", "Deep Learning"],
            ),
            RoleEntry::new(
                RoleBucket::DataEngineer,
                "data engineer",
                &["Big Data", "Data Engineering", "Databases", "ETL and Pipelines"],
            ),
            RoleEntry::new(
                RoleBucket::Product,
                "product",
                &["Product Management", "Business Analysis", "A/B Testing", "Product Metrics"],
            ),
            RoleEntry::new(
                RoleBucket::Research,
                "research",
                &["Advanced Machine Learning", "Statistical Learning", "Scientific Writing"],
            ),
        ])
    }
}

impl ElectiveTable {
    pub fn new(entries: Vec<RoleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    /// Electives configured for `bucket`, in table order.
    pub fn electives_for(&self, bucket: RoleBucket) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.bucket == bucket)
            .map(|entry| entry.electives.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve the role bucket for a request.
    pub fn resolve(&self, background: &str, target_role: &str) -> RoleBucket {
        let target = target_role.to_lowercase();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| target.contains(entry.leading_word()))
        {
            return entry.bucket;
        }

        let background = background.to_lowercase();
        BACKGROUND_RULES
            .iter()
            .find(|(stems, _)| stems.iter().any(|stem| background.contains(stem)))
            .map_or(RoleBucket::MlEngineer, |&(_, bucket)| bucket)
    }

    /// Up to [`MAX_RECOMMENDATIONS`] electives for the resolved role.
    pub fn recommend(&self, request: &RoleRequest<'_>) -> Vec<String> {
        let bucket = self.resolve(request.background, request.target_role);
        tracing::debug!(?bucket, "role resolved");

        self.electives_for(bucket)
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .cloned()
            .collect()
    }
}

/// Background and target role parsed from a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRequest<'a> {
    pub background: &'a str,
    pub target_role: &'a str,
}

/// Split `background -> target role`. Without the delimiter the whole
/// message is the target role and the background is empty.
pub fn parse_role_request(text: &str) -> RoleRequest<'_> {
    if text.contains(ROLE_DELIMITER) {
        let mut parts = text.split(ROLE_DELIMITER);
        RoleRequest {
            background: parts.next().unwrap_or_default(),
            target_role: parts.next().unwrap_or_default(),
        }
    } else {
        RoleRequest {
            background: "",
            target_role: text,
        }
    }
}
