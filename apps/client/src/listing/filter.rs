use crate::models::JobListing;

/// Active dashboard filters. Both fields are case-insensitive substring
/// matches; an empty field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub employment_type_substring: String,
    pub company_substring: String,
}

impl FilterState {
    pub fn new(employment_type: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            employment_type_substring: employment_type.into(),
            company_substring: company.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employment_type_substring.is_empty() && self.company_substring.is_empty()
    }

    pub fn matches(&self, job: &JobListing) -> bool {
        contains_ignore_case(&job.employment_type, &self.employment_type_substring)
            && contains_ignore_case(&job.company, &self.company_substring)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns the listings of `all` that pass `state`, in their original order.
pub fn apply_filter(all: &[JobListing], state: &FilterState) -> Vec<JobListing> {
    all.iter().filter(|job| state.matches(job)).cloned().collect()
}
