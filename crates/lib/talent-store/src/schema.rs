pub const TABLE_CANDIDATE: &str = "candidate";
pub const TABLE_USER: &str = "user";

pub const FIELD_UUID: &str = "uuid";
pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_CAREER_LEVEL: &str = "career_level";
pub const FIELD_JOB_MAJOR: &str = "job_major";
pub const FIELD_DEGREE_TYPE: &str = "degree_type";
pub const FIELD_SKILLS: &str = "skills";
pub const FIELD_NATIONALITY: &str = "nationality";
pub const FIELD_CITY: &str = "city";
pub const FIELD_SALARY: &str = "salary";
pub const FIELD_YEARS_OF_EXPERIENCE: &str = "years_of_experience";
pub const FIELD_GENDER: &str = "gender";

/// Candidate fields compared by exact integer value.
pub const CANDIDATE_NUMERIC_FIELDS: [&str; 2] = [FIELD_SALARY, FIELD_YEARS_OF_EXPERIENCE];

/// Candidate fields compared by case-insensitive substring over their text form.
pub const CANDIDATE_TEXT_FIELDS: [&str; 12] = [
    FIELD_FIRST_NAME,
    FIELD_LAST_NAME,
    FIELD_EMAIL,
    FIELD_UUID,
    FIELD_CAREER_LEVEL,
    FIELD_JOB_MAJOR,
    FIELD_DEGREE_TYPE,
    FIELD_SKILLS,
    FIELD_NATIONALITY,
    FIELD_CITY,
    FIELD_SALARY,
    FIELD_GENDER,
];

/// Column order of the candidate CSV report.
pub const CANDIDATE_REPORT_COLUMNS: [&str; 13] = [
    FIELD_UUID,
    FIELD_FIRST_NAME,
    FIELD_LAST_NAME,
    FIELD_EMAIL,
    FIELD_CAREER_LEVEL,
    FIELD_JOB_MAJOR,
    FIELD_DEGREE_TYPE,
    FIELD_YEARS_OF_EXPERIENCE,
    FIELD_SKILLS,
    FIELD_NATIONALITY,
    FIELD_CITY,
    FIELD_SALARY,
    FIELD_GENDER,
];
