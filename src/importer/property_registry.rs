// ==========================================
// 药理学数据导入系统 - 属性值登记表 / 复合 ID 拼接
// ==========================================
// 职责: 属性内取值去重与局部 ID 分配,以及入库用全局 pv_id 的拼接
// 约束: 局部 ID 首见顺序分配,单次导入内稳定;每次导入新建实例
// ==========================================

use crate::domain::molecule::PropertyValueEntry;
use crate::domain::types::Property;
use std::collections::HashMap;

// ==========================================
// PropertyValueRegistry
// ==========================================
#[derive(Debug, Default)]
pub struct PropertyValueRegistry {
    // 按属性 ID 顺序的三个取值列表（保持首见顺序）
    values: [Vec<PropertyValueEntry>; 3],
    index: HashMap<(Property, String), i64>,
}

impl PropertyValueRegistry {
    pub fn new() -> Self {
        PropertyValueRegistry::default()
    }

    fn slot(property: Property) -> usize {
        property.id() as usize - 1
    }

    /// 取值 → 属性内局部 ID
    ///
    /// 首次出现的取值分配该属性的下一个序号（从 1 起）;
    /// 相同取值（按去首尾空白后相等）再次解析返回同一序号。
    pub fn resolve_value_id(&mut self, property: Property, raw_value: &str) -> i64 {
        let name = raw_value.trim().to_string();
        let key = (property, name.clone());

        if let Some(&existing) = self.index.get(&key) {
            return existing;
        }

        let slot = Self::slot(property);
        let id = self.values[slot].len() as i64 + 1;
        self.values[slot].push(PropertyValueEntry { id, name });
        self.index.insert(key, id);
        id
    }

    /// 属性的全量去重取值（首见顺序）
    pub fn values(&self, property: Property) -> &[PropertyValueEntry] {
        &self.values[Self::slot(property)]
    }
}

/// 拼接入库用的全局属性值 ID（pv_id）
///
/// 边界格式约定: 属性 ID 与局部 ID 的十进制拼接。
/// 属性 ID 域固定为个位数 {1,2,3} 且局部 ID 无前导零,该拼接在本域内单射。
pub fn compose_value_id(property_id: i64, local_id: i64) -> i64 {
    debug_assert!(
        (1..=9).contains(&property_id),
        "属性 ID 超出个位数域,拼接不再单射"
    );
    debug_assert!(local_id >= 1, "局部 ID 从 1 起");

    let mut magnitude = 10;
    while magnitude <= local_id {
        magnitude *= 10;
    }
    property_id * magnitude + local_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_occurrence_allocates_sequence() {
        let mut registry = PropertyValueRegistry::new();
        assert_eq!(registry.resolve_value_id(Property::Indications, "Hypertension"), 1);
        assert_eq!(registry.resolve_value_id(Property::Indications, "Angor"), 2);
        assert_eq!(registry.resolve_value_id(Property::Indications, "Migraine"), 3);
    }

    #[test]
    fn test_re_resolving_is_stable() {
        let mut registry = PropertyValueRegistry::new();
        let first = registry.resolve_value_id(Property::SideEffects, "Nausées");
        let again = registry.resolve_value_id(Property::SideEffects, "Nausées");
        let trimmed = registry.resolve_value_id(Property::SideEffects, "  Nausées  ");

        assert_eq!(first, again);
        assert_eq!(first, trimmed);
        assert_eq!(registry.values(Property::SideEffects).len(), 1);
    }

    #[test]
    fn test_properties_have_independent_counters() {
        let mut registry = PropertyValueRegistry::new();
        assert_eq!(registry.resolve_value_id(Property::SideEffects, "Vertiges"), 1);
        assert_eq!(registry.resolve_value_id(Property::Interactions, "AVK"), 1);
        assert_eq!(registry.resolve_value_id(Property::Indications, "Douleur"), 1);
    }

    #[test]
    fn test_values_keep_first_seen_order() {
        let mut registry = PropertyValueRegistry::new();
        registry.resolve_value_id(Property::Interactions, "AVK");
        registry.resolve_value_id(Property::Interactions, "AINS");
        registry.resolve_value_id(Property::Interactions, "AVK");

        let names: Vec<&str> = registry
            .values(Property::Interactions)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["AVK", "AINS"]);
    }

    #[test]
    fn test_compose_decimal_concatenation() {
        assert_eq!(compose_value_id(1, 1), 11);
        assert_eq!(compose_value_id(2, 7), 27);
        assert_eq!(compose_value_id(3, 12), 312);
        assert_eq!(compose_value_id(1, 230), 1230);
    }

    #[test]
    fn test_compose_injective_over_used_domain() {
        let mut seen = HashSet::new();
        for property in Property::ALL {
            for local in 1..=500 {
                assert!(
                    seen.insert(compose_value_id(property.id(), local)),
                    "复合 ID 冲突: property={} local={}",
                    property.id(),
                    local
                );
            }
        }
    }
}
