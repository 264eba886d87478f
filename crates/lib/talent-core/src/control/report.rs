use surrealdb::Connection;
use talent_store::models::Candidate;
use talent_store::schema::CANDIDATE_REPORT_COLUMNS;
use tracing::info;

use crate::query::FilterPredicate;

use super::{ControlError, TalentControlPlane};

pub const REPORT_FILE_NAME: &str = "candidates_report.csv";
pub const SKILL_SEPARATOR: &str = ", ";

impl<C: Connection> TalentControlPlane<C> {
    /// Renders every stored candidate as CSV, one row per candidate.
    ///
    /// # Errors
    /// Returns `ControlError` if the store query or CSV encoding fails.
    pub async fn candidates_report(&self) -> Result<String, ControlError> {
        let candidates = self
            .store
            .find_candidates(&FilterPredicate::match_all())
            .await?;
        let csv = render_csv(&candidates)?;
        info!(rows = candidates.len(), "candidate report generated");
        Ok(csv)
    }
}

/// Encodes candidates using the report column order.
///
/// # Errors
/// Returns `ControlError::Report` if the writer fails.
pub fn render_csv(candidates: &[Candidate]) -> Result<String, ControlError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CANDIDATE_REPORT_COLUMNS)
        .map_err(report_error)?;
    for candidate in candidates {
        writer.write_record(candidate_row(candidate)).map_err(report_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ControlError::Report(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ControlError::Report(err.to_string()))
}

fn candidate_row(candidate: &Candidate) -> [String; 13] {
    [
        candidate.uuid.clone(),
        candidate.first_name.clone(),
        candidate.last_name.clone(),
        candidate.email.clone(),
        candidate.career_level.clone(),
        candidate.job_major.clone(),
        candidate.degree_type.clone(),
        candidate.years_of_experience.to_string(),
        candidate.skills.join(SKILL_SEPARATOR),
        candidate.nationality.clone(),
        candidate.city.clone(),
        candidate.salary.to_string(),
        candidate.gender.clone(),
    ]
}

fn report_error(err: csv::Error) -> ControlError {
    ControlError::Report(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            uuid: "u-1".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            career_level: "Senior".to_string(),
            job_major: "Mathematics".to_string(),
            degree_type: "PhD".to_string(),
            years_of_experience: 30,
            skills: vec!["COBOL".to_string(), "compilers".to_string()],
            nationality: "American".to_string(),
            city: "New York, NY".to_string(),
            salary: 120_000,
            gender: "female".to_string(),
        }
    }

    #[test]
    fn empty_report_has_only_header() {
        let csv = render_csv(&[]).expect("csv should render");
        assert_eq!(
            csv,
            "uuid,first_name,last_name,email,career_level,job_major,degree_type,years_of_experience,skills,nationality,city,salary,gender\n"
        );
    }

    #[test]
    fn report_quotes_fields_with_commas() {
        let csv = render_csv(&[candidate()]).expect("csv should render");
        let row = csv.lines().nth(1).expect("report should contain a row");
        assert_eq!(
            row,
            r#"u-1,Grace,Hopper,grace@example.com,Senior,Mathematics,PhD,30,"COBOL, compilers",American,"New York, NY",120000,female"#
        );
    }
}
