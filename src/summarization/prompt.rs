//! Prompt text for student profile summaries.

use crate::model::Student;

/// Sampling temperature sent with every summary request.
pub const SUMMARY_TEMPERATURE: f64 = 0.7;
/// Upper bound on generated tokens per summary.
pub const SUMMARY_MAX_TOKENS: u32 = 300;

/// Render the instruction asking for a short, positive profile of `student`.
pub fn student_profile_prompt(student: &Student) -> String {
    format!(
        "Create a professional student profile summary for:\n\
         Student ID: {id}\n\
         Name: {name}\n\
         Age: {age}\n\
         Email: {email}\n\
         \n\
         Write 2-3 sentences describing the student, including their ID, age, and potential academic interests.\n\
         Keep it professional and positive.",
        id = student.id,
        name = student.name,
        age = student.age,
        email = student.email,
    )
}
