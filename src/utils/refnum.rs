//! 참조 번호 생성 유틸리티
//!
//! 부서 접두어와 엔터티 코드로 `{prefix}-{code}{NNN}` 형식의 순차 번호를
//! 만듭니다. 번호는 생성 트랜잭션 안에서 한 번만 부여되며 이후 불변입니다.

use rand::Rng;

/// 부서명에서 기본 접두어를 유도합니다 (알파벳 앞 3글자, 대문자).
///
/// 예: "Quality Assurance" → "QUA"
pub fn department_prefix(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// 접두어 충돌 시 임의의 3자리 숫자를 붙여 구분합니다.
pub fn disambiguated_prefix(base: &str) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(100..1000);
    format!("{}{}", base, suffix)
}

/// 부서 범위 순차 번호: `{prefix}-{code}{NNN}` (3자리 제로 패딩)
///
/// `existing`은 같은 범위에 이미 존재하는 레코드 수입니다.
pub fn sequence_number(prefix: &str, code: &str, existing: u64) -> String {
    format!("{}-{}{:03}", prefix, code, existing + 1)
}

/// CAPA 번호: 상위 일탈 번호 범위의 순차 번호 (2자리 제로 패딩)
///
/// 예: `QUA-DEV001` 의 첫 CAPA → `QUA-DEV001-CAPA01`
pub fn capa_number(deviation_number: &str, existing: u64) -> String {
    format!("{}-CAPA{:02}", deviation_number, existing + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_prefix_from_first_three_letters() {
        assert_eq!(department_prefix("Quality Assurance"), "QUA");
        assert_eq!(department_prefix("production"), "PRO");
        assert_eq!(department_prefix("IT"), "IT");
    }

    #[test]
    fn should_skip_non_alphabetic_characters() {
        assert_eq!(department_prefix("R&D Lab"), "RDL");
        assert_eq!(department_prefix(" 3rd Shift"), "RDS");
    }

    #[test]
    fn should_append_three_digit_suffix_on_collision() {
        let prefix = disambiguated_prefix("QUA");
        assert_eq!(prefix.len(), 6);
        assert!(prefix.starts_with("QUA"));
        assert!(prefix[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn should_number_first_record_as_001() {
        assert_eq!(sequence_number("QUA", "DEV", 0), "QUA-DEV001");
    }

    #[test]
    fn should_increment_sequence_by_one() {
        assert_eq!(sequence_number("QUA", "DEV", 1), "QUA-DEV002");
        assert_eq!(sequence_number("QUA", "CC", 41), "QUA-CC042");
        assert_eq!(sequence_number("PRO", "MAN", 999), "PRO-MAN1000");
    }

    #[test]
    fn should_scope_capa_number_to_parent_deviation() {
        assert_eq!(capa_number("QUA-DEV001", 0), "QUA-DEV001-CAPA01");
        assert_eq!(capa_number("QUA-DEV001", 1), "QUA-DEV001-CAPA02");
    }
}
