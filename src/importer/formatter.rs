// ==========================================
// 药理学数据导入系统 - 分子格式化器
// ==========================================
// 职责: 解析中间结构 → 入库结构的纯转换（截断 / 缺省 / 难度派生）
// 约束: 不修改输入;主键缺失即失败,其余字段可缺省
// ==========================================

use crate::domain::molecule::{
    truncate_chars, Molecule, RawMoleculeRecord, MAX_DCI_LEN, MAX_SKELETAL_FORMULA_LEN,
};
use crate::domain::types::Difficulty;
use crate::importer::error::{ImportError, ImportResult};

pub struct MoleculeFormatter;

impl MoleculeFormatter {
    /// 格式化一条解析记录
    ///
    /// - id 缺失 → MissingMoleculeId（主键不可缺省）
    /// - ntr 缺失 → 0
    /// - dci 截断至 128 字符,骨架式截断至 64 字符（缺失为空串）
    /// - difficulty 由专家级标记派生
    pub fn format(&self, record: &RawMoleculeRecord) -> ImportResult<Molecule> {
        let id = record.id.ok_or(ImportError::MissingMoleculeId {
            row: record.row_number,
        })?;

        Ok(Molecule {
            id,
            dci: truncate_chars(record.dci.as_deref().unwrap_or(""), MAX_DCI_LEN),
            skeletal_formula: truncate_chars(
                record.skeletal_formula.as_deref().unwrap_or(""),
                MAX_SKELETAL_FORMULA_LEN,
            ),
            ntr: record.ntr.unwrap_or(0),
            difficulty: if record.level_hard {
                Difficulty::Hard
            } else {
                Difficulty::Easy
            },
            system: record.system,
            class: record.class,
            side_effects: record.side_effects.clone(),
            indications: record.indications.clone(),
            interactions: record.interactions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> RawMoleculeRecord {
        RawMoleculeRecord {
            id: Some(1),
            dci: Some("AMIODARONE".to_string()),
            skeletal_formula: Some("C25H29I2NO3".to_string()),
            ntr: Some(1),
            level_easy: false,
            level_hard: false,
            system: Some(4),
            class: Some(7),
            side_effects: vec![1, 2],
            indications: vec![3],
            interactions: vec![],
            row_number: 1,
        }
    }

    #[test]
    fn test_format_basic() {
        let record = base_record();
        let molecule = MoleculeFormatter.format(&record).unwrap();

        assert_eq!(molecule.id, 1);
        assert_eq!(molecule.dci, "AMIODARONE");
        assert_eq!(molecule.skeletal_formula, "C25H29I2NO3");
        assert_eq!(molecule.ntr, 1);
        assert_eq!(molecule.difficulty, Difficulty::Easy);
        assert_eq!(molecule.system, Some(4));
        assert_eq!(molecule.class, Some(7));
        assert_eq!(molecule.side_effects, vec![1, 2]);
    }

    #[test]
    fn test_format_does_not_mutate_input() {
        let record = base_record();
        let before = record.clone();
        let _ = MoleculeFormatter.format(&record).unwrap();
        assert_eq!(record.side_effects, before.side_effects);
        assert_eq!(record.dci, before.dci);
    }

    #[test]
    fn test_missing_id_fails() {
        let mut record = base_record();
        record.id = None;
        record.row_number = 12;

        let err = MoleculeFormatter.format(&record).unwrap_err();
        assert!(matches!(err, ImportError::MissingMoleculeId { row: 12 }));
    }

    #[test]
    fn test_ntr_defaults_to_zero() {
        let mut record = base_record();
        record.ntr = None;
        assert_eq!(MoleculeFormatter.format(&record).unwrap().ntr, 0);
    }

    #[test]
    fn test_expert_flag_maps_to_hard() {
        let mut record = base_record();
        record.level_hard = true;
        assert_eq!(
            MoleculeFormatter.format(&record).unwrap().difficulty,
            Difficulty::Hard
        );
    }

    #[test]
    fn test_truncation_limits() {
        let mut record = base_record();
        record.dci = Some("A".repeat(MAX_DCI_LEN + 30));
        record.skeletal_formula = Some("C".repeat(MAX_SKELETAL_FORMULA_LEN + 5));

        let molecule = MoleculeFormatter.format(&record).unwrap();
        assert_eq!(molecule.dci.chars().count(), MAX_DCI_LEN);
        assert_eq!(
            molecule.skeletal_formula.chars().count(),
            MAX_SKELETAL_FORMULA_LEN
        );
    }

    #[test]
    fn test_missing_formula_becomes_empty() {
        let mut record = base_record();
        record.skeletal_formula = None;
        assert_eq!(MoleculeFormatter.format(&record).unwrap().skeletal_formula, "");
    }
}
