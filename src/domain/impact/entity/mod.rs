pub mod impact_answer;
pub mod impact_assessment;
