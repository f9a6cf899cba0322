// ==========================================
// 药理学数据导入系统 - 领域类型定义
// ==========================================
// 属性 ID 与难度枚举为数据库边界格式,序列化与库内写入保持一致
// ==========================================

use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 难度等级 (Difficulty)
// ==========================================
// 由专家级标记列派生,入库格式为 EASY / HARD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy, // 基础难度
    Hard, // 专家难度
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

// ==========================================
// 多值属性 (Property)
// ==========================================
// 属性 ID 固定: sideEffects=1 / interactions=2 / indications=3
// 该编号参与复合主键拼接,不可变更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    SideEffects,  // 不良反应
    Interactions, // 相互作用
    Indications,  // 适应症
}

impl Property {
    /// 属性表主键（pr_id）
    pub fn id(self) -> i64 {
        match self {
            Property::SideEffects => 1,
            Property::Interactions => 2,
            Property::Indications => 3,
        }
    }

    /// 属性表名称（pr_name）
    pub fn name(self) -> &'static str {
        match self {
            Property::SideEffects => "sideEffects",
            Property::Interactions => "interactions",
            Property::Indications => "indications",
        }
    }

    /// 按名称解析属性（防御性，读取库内数据时使用）
    pub fn from_name(name: &str) -> Result<Self, ImportError> {
        match name {
            "sideEffects" => Ok(Property::SideEffects),
            "interactions" => Ok(Property::Interactions),
            "indications" => Ok(Property::Indications),
            other => Err(ImportError::UnknownProperty(other.to_string())),
        }
    }

    /// 脚本输出时的固定遍历顺序
    pub const ALL: [Property; 3] = [
        Property::SideEffects,
        Property::Indications,
        Property::Interactions,
    ];
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_ids_are_fixed() {
        assert_eq!(Property::SideEffects.id(), 1);
        assert_eq!(Property::Interactions.id(), 2);
        assert_eq!(Property::Indications.id(), 3);
    }

    #[test]
    fn test_property_from_name_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::from_name(property.name()).unwrap(), property);
        }
    }

    #[test]
    fn test_property_from_name_unknown() {
        assert!(Property::from_name("contraindications").is_err());
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Easy.to_string(), "EASY");
        assert_eq!(Difficulty::Hard.to_string(), "HARD");
    }
}
