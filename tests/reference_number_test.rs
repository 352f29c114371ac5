//! 참조 번호 생성 테스트
//!
//! 테스트 대상:
//! - 부서 접두어 유도와 충돌 구분
//! - 부서 범위 순차 번호 (첫 레코드 001)
//! - 일탈 범위 CAPA 번호

use qms_server::utils::refnum::{
    capa_number, department_prefix, disambiguated_prefix, sequence_number,
};

// ============== 접두어 테스트 ==============

#[test]
fn should_derive_qua_prefix_from_quality_assurance() {
    // Arrange & Act
    let prefix = department_prefix("Quality Assurance");

    // Assert
    assert_eq!(prefix, "QUA");
}

#[test]
fn should_uppercase_and_ignore_non_letters() {
    assert_eq!(department_prefix("production line 2"), "PRO");
    assert_eq!(department_prefix("r&d"), "RD");
    assert_eq!(department_prefix("  qc  "), "QC");
}

#[test]
fn should_disambiguate_with_random_three_digit_suffix() {
    // Act
    let candidate = disambiguated_prefix("QUA");

    // Assert: QUA + 3자리 숫자
    assert_eq!(candidate.len(), 6);
    assert!(candidate.starts_with("QUA"));
    assert!(candidate[3..].parse::<u16>().is_ok());
}

// ============== 순차 번호 테스트 ==============

#[test]
fn should_give_first_deviation_in_department_number_001() {
    // 부서의 첫 레코드는 접미사 001
    assert_eq!(sequence_number("QUA", "DEV", 0), "QUA-DEV001");
}

#[test]
fn should_increment_by_one_within_same_department() {
    assert_eq!(sequence_number("QUA", "DEV", 1), "QUA-DEV002");
    assert_eq!(sequence_number("QUA", "DEV", 2), "QUA-DEV003");
    assert_eq!(sequence_number("QUA", "DEV", 11), "QUA-DEV012");
}

#[test]
fn should_scope_counters_per_entity_code() {
    // 같은 부서라도 문서 종류별로 독립 증가
    assert_eq!(sequence_number("QUA", "CC", 0), "QUA-CC001");
    assert_eq!(sequence_number("QUA", "MAN", 0), "QUA-MAN001");
    assert_eq!(sequence_number("QUA", "POL", 4), "QUA-POL005");
    assert_eq!(sequence_number("QUA", "WIN", 0), "QUA-WIN001");
}

// ============== CAPA 번호 테스트 ==============

#[test]
fn should_build_capa_number_from_parent_deviation_number() {
    // QUA-DEV001의 첫 CAPA → QUA-DEV001-CAPA01
    assert_eq!(capa_number("QUA-DEV001", 0), "QUA-DEV001-CAPA01");
}

#[test]
fn should_increment_capa_number_within_same_deviation() {
    assert_eq!(capa_number("QUA-DEV001", 1), "QUA-DEV001-CAPA02");
    assert_eq!(capa_number("QUA-DEV003", 9), "QUA-DEV003-CAPA10");
}
