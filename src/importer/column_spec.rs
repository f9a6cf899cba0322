// ==========================================
// 药理学数据导入系统 - 列规格注册表
// ==========================================
// 职责: 声明源文件列契约（标题模式 / 目标属性 / 列类别）
// 约束: 标题按整体匹配,注册顺序即解析顺序,首个命中生效
// ==========================================

use crate::domain::types::Property;
use regex::Regex;

// ==========================================
// 列类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Unique,       // 单值列（每分子一个值）
    Hierarchical, // 层级列（标题携带层级序号）
    MultiValued,  // 多值列（单元格内可含多个取值）
}

// ==========================================
// 目标属性
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnProperty {
    Dci,             // 国际非专利药名
    SkeletalFormula, // 化学骨架式
    Systems,         // 人体系统层级
    Classes,         // 药理分类层级
    Ntr,             // 窄治疗窗标记（MTE）
    Interactions,    // 相互作用
    Indications,     // 适应症
    SideEffects,     // 不良反应
    LevelEasy,       // 基础级标记
    LevelHard,       // 专家级标记
}

impl ColumnProperty {
    /// 多值列对应的属性表枚举
    pub fn as_property(self) -> Option<Property> {
        match self {
            ColumnProperty::SideEffects => Some(Property::SideEffects),
            ColumnProperty::Interactions => Some(Property::Interactions),
            ColumnProperty::Indications => Some(Property::Indications),
            _ => None,
        }
    }
}

// ==========================================
// ColumnSpecification - 单列规格
// ==========================================
#[derive(Debug)]
pub struct ColumnSpecification {
    title_pattern: Regex,
    property: ColumnProperty,
    kind: ColumnKind,
}

impl ColumnSpecification {
    fn new(pattern: &str, property: ColumnProperty, kind: ColumnKind) -> Self {
        // 整体匹配: 标题必须完整满足模式,而非子串命中
        let anchored = format!("^(?:{})$", pattern);
        ColumnSpecification {
            title_pattern: Regex::new(&anchored).expect("列标题模式非法"),
            property,
            kind,
        }
    }

    /// 标题是否满足本列模式（整体匹配）
    pub fn matches_title(&self, title: &str) -> bool {
        self.title_pattern.is_match(title)
    }

    /// 层级列从标题中捕获的层级序号（1 起）
    pub fn hierarchy_level(&self, title: &str) -> Option<u32> {
        self.title_pattern
            .captures(title)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    pub fn property(&self) -> ColumnProperty {
        self.property
    }

    pub fn is_unique(&self) -> bool {
        self.kind == ColumnKind::Unique
    }

    pub fn is_hierarchical(&self) -> bool {
        self.kind == ColumnKind::Hierarchical
    }

    pub fn is_multi_valued(&self) -> bool {
        self.kind == ColumnKind::MultiValued
    }
}

// ==========================================
// ResolvedColumn - 标题解析结果
// ==========================================
#[derive(Debug)]
pub struct ResolvedColumn<'a> {
    pub spec: &'a ColumnSpecification,
    pub level: Option<u32>, // 仅层级列有值
}

// ==========================================
// ColumnRegistry - 列规格注册表
// ==========================================
#[derive(Debug)]
pub struct ColumnRegistry {
    specs: Vec<ColumnSpecification>,
}

impl ColumnRegistry {
    /// 固定的源文件列契约
    pub fn standard() -> Self {
        use ColumnKind::{Hierarchical, MultiValued, Unique};
        use ColumnProperty as P;

        ColumnRegistry {
            specs: vec![
                ColumnSpecification::new("DCI", P::Dci, Unique),
                ColumnSpecification::new("FORMULE_CHIMIQUE", P::SkeletalFormula, Unique),
                ColumnSpecification::new(r"SYSTEME_(\d+)", P::Systems, Hierarchical),
                ColumnSpecification::new(r"CLASSE_PHARMA_(\d+)", P::Classes, Hierarchical),
                ColumnSpecification::new("MTE", P::Ntr, Unique),
                ColumnSpecification::new(r"INTERACTION(?:_\d+)?", P::Interactions, MultiValued),
                ColumnSpecification::new(r"INDICATION(?:_\d+)?", P::Indications, MultiValued),
                ColumnSpecification::new(r"EFFET_INDESIRABLE(?:_\d+)?", P::SideEffects, MultiValued),
                ColumnSpecification::new("NIVEAU_DEBUTANT", P::LevelEasy, Unique),
                ColumnSpecification::new("NIVEAU_EXPERT", P::LevelHard, Unique),
            ],
        }
    }

    /// 按注册顺序解析标题,返回首个命中;无命中的列被忽略（向前兼容多余列）
    pub fn resolve(&self, title: &str) -> Option<ResolvedColumn<'_>> {
        self.specs.iter().find_map(|spec| {
            if spec.matches_title(title) {
                Some(ResolvedColumn {
                    spec,
                    level: if spec.is_hierarchical() {
                        spec.hierarchy_level(title)
                    } else {
                        None
                    },
                })
            } else {
                None
            }
        })
    }
}
