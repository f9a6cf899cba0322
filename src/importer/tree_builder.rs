// ==========================================
// 药理学数据导入系统 - 分类树构建器
// ==========================================
// 职责: 将逐行的层级取值序列折叠为带稳定 ID 的分类森林
// 结构: 显式 arena（(层级, 名称, 父节点) → ID）,计数器随构建器存活,无全局状态
// ==========================================

use crate::domain::molecule::{truncate_chars, ClassificationNode, MAX_CLASSIFICATION_VALUE_LEN};
use std::collections::HashMap;

/// arena 内的扁平节点记录
#[derive(Debug, Clone)]
struct ArenaEntry {
    id: i64,
    name: String,
    parent: Option<i64>,
}

// ==========================================
// ClassificationTreeBuilder
// ==========================================
// 每次导入新建一个实例;跨导入复用会破坏 ID 的首见顺序约定
#[derive(Debug)]
pub struct ClassificationTreeBuilder {
    index: HashMap<(u32, String, Option<i64>), i64>,
    entries: Vec<ArenaEntry>,
    next_id: i64,
}

impl ClassificationTreeBuilder {
    pub fn new() -> Self {
        ClassificationTreeBuilder {
            index: HashMap::new(),
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// 插入一条从一级开始的路径,返回最深节点的 ID
    ///
    /// 同一 (层级, 名称, 父节点) 的节点跨行复用同一 ID;
    /// 同名但父节点不同的节点是不同节点。
    pub fn insert_path(&mut self, path: &[String]) -> Option<i64> {
        let mut parent: Option<i64> = None;
        let mut deepest: Option<i64> = None;

        for (depth, name) in path.iter().enumerate() {
            let level = depth as u32 + 1;
            let name = truncate_chars(name.trim(), MAX_CLASSIFICATION_VALUE_LEN);
            let key = (level, name.clone(), parent);

            let id = match self.index.get(&key) {
                Some(&existing) => existing,
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    self.index.insert(key, id);
                    self.entries.push(ArenaEntry { id, name, parent });
                    id
                }
            };

            parent = Some(id);
            deepest = Some(id);
        }

        deepest
    }

    /// 当前节点总数
    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    /// 组装为嵌套森林;一级节点与各层子节点均保持首见顺序
    pub fn into_forest(self) -> Vec<ClassificationNode> {
        let mut children_of: HashMap<Option<i64>, Vec<ArenaEntry>> = HashMap::new();
        for entry in self.entries {
            children_of.entry(entry.parent).or_default().push(entry);
        }
        assemble(&mut children_of, None)
    }
}

fn assemble(
    children_of: &mut HashMap<Option<i64>, Vec<ArenaEntry>>,
    parent: Option<i64>,
) -> Vec<ClassificationNode> {
    children_of
        .remove(&parent)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let children = assemble(children_of, Some(entry.id));
            ClassificationNode {
                id: entry.id,
                name: entry.name,
                children,
            }
        })
        .collect()
}
