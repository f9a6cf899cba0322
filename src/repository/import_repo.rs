// ==========================================
// 药理学数据导入系统 - 导入数据仓储
// ==========================================
// 职责: 建表,执行生成的脚本,提供导入后核对查询
// 事务: 脚本中的事务标记为逻辑契约,由本层以单个 rusqlite 事务兑现
// ==========================================

use crate::db;
use crate::domain::types::Property;
use crate::importer::error::ImportResult;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

/// 六张目标表的建表语句
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS class (
    cl_id     INTEGER PRIMARY KEY,
    cl_name   TEXT NOT NULL,
    cl_higher INTEGER REFERENCES class(cl_id),
    cl_level  INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS system (
    sy_id     INTEGER PRIMARY KEY,
    sy_name   TEXT NOT NULL,
    sy_higher INTEGER REFERENCES system(sy_id),
    sy_level  INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS property (
    pr_id   INTEGER PRIMARY KEY,
    pr_name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS property_value (
    pv_id       INTEGER PRIMARY KEY,
    pv_name     TEXT NOT NULL,
    pv_property INTEGER NOT NULL REFERENCES property(pr_id)
);
CREATE TABLE IF NOT EXISTS molecule (
    mo_id               INTEGER PRIMARY KEY,
    mo_dci              TEXT NOT NULL,
    mo_skeletal_formula TEXT,
    mo_ntr              INTEGER NOT NULL,
    mo_difficulty       TEXT NOT NULL,
    mo_system           INTEGER REFERENCES system(sy_id),
    mo_class            INTEGER REFERENCES class(cl_id)
);
CREATE TABLE IF NOT EXISTS molecule_property (
    mo_id INTEGER NOT NULL REFERENCES molecule(mo_id),
    pv_id INTEGER NOT NULL REFERENCES property_value(pv_id)
);
";

// ==========================================
// 核对查询的行结构
// ==========================================

/// 分类表一行（核对查询用）
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRow {
    pub id: i64,
    pub name: String,
    pub higher: Option<i64>,
    pub level: i64,
}

/// 单个分子的库内视图（按 DCI 取回）
#[derive(Debug, Clone, Default)]
pub struct MoleculeRow {
    pub id: i64,
    pub ntr: i64,
    pub difficulty: String,
    pub system: Option<String>,
    pub class: Option<String>,
    pub side_effects: Vec<String>,
    pub indications: Vec<String>,
    pub interactions: Vec<String>,
}

// ==========================================
// ImportRepository
// ==========================================
pub struct ImportRepository {
    conn: Connection,
}

impl ImportRepository {
    /// 打开数据库并应用统一 PRAGMA
    pub fn new(db_path: &str) -> ImportResult<Self> {
        let conn = db::open_sqlite_connection(db_path)?;
        Ok(ImportRepository { conn })
    }

    /// 建表（幂等）
    pub fn init_schema(&self) -> ImportResult<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// 在单个事务内执行脚本语句,返回实际执行条数
    ///
    /// 脚本头尾的事务控制语句（START TRANSACTION / SET … / COMMIT）由本层
    /// 的事务语义兑现,不逐条下发。
    pub fn execute_script(&mut self, statements: &[String]) -> ImportResult<usize> {
        let tx = self.conn.transaction()?;
        // 兑现脚本中的 FOREIGN_KEY_CHECKS 标记: 约束校验延后到提交
        tx.execute_batch("PRAGMA defer_foreign_keys = ON;")?;
        let mut executed = 0;

        for statement in statements {
            if is_transaction_marker(statement) {
                continue;
            }
            tx.execute_batch(statement)?;
            executed += 1;
        }

        tx.commit()?;
        info!(executed, "脚本执行完成");
        Ok(executed)
    }

    /// 表行数
    pub fn count_rows(&self, table: &str) -> ImportResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        debug!(table, "核对行数");
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// 某属性的全量取值文本
    pub fn property_values(&self, property: Property) -> ImportResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT pv_name FROM property, property_value
             WHERE pv_property = pr_id AND pr_name = ?1
             ORDER BY pv_id",
        )?;
        let values = stmt
            .query_map(params![property.name()], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(values)
    }

    /// 分类表全量节点（按 ID 升序）
    pub fn classification_rows(&self, table: &str) -> ImportResult<Vec<ClassificationRow>> {
        let prefix: String = table.chars().take(2).collect();
        let sql = format!(
            "SELECT {p}_id, {p}_name, {p}_higher, {p}_level FROM {t} ORDER BY {p}_id",
            p = prefix,
            t = table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ClassificationRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    higher: row.get(2)?,
                    level: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 按 DCI 取回分子及其分类名称与属性取值
    pub fn molecule_by_dci(&self, dci: &str) -> ImportResult<Option<MoleculeRow>> {
        let head = self
            .conn
            .query_row(
                "SELECT mo_id, mo_ntr, mo_difficulty,
                        (SELECT sy_name FROM system WHERE sy_id = mo_system),
                        (SELECT cl_name FROM class WHERE cl_id = mo_class)
                 FROM molecule WHERE mo_dci = ?1",
                params![dci],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, ntr, difficulty, system, class)) = head else {
            return Ok(None);
        };

        let mut molecule = MoleculeRow {
            id,
            ntr,
            difficulty,
            system,
            class,
            ..Default::default()
        };

        let mut stmt = self.conn.prepare(
            "SELECT pr_name, pv_name
             FROM molecule_property
             JOIN property_value ON molecule_property.pv_id = property_value.pv_id
             JOIN property ON pv_property = pr_id
             WHERE mo_id = ?1
             ORDER BY property_value.pv_id",
        )?;
        let pairs = stmt
            .query_map(params![id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for (property_name, value) in pairs {
            match Property::from_name(&property_name)? {
                Property::SideEffects => molecule.side_effects.push(value),
                Property::Indications => molecule.indications.push(value),
                Property::Interactions => molecule.interactions.push(value),
            }
        }

        Ok(Some(molecule))
    }
}

/// 事务控制语句由执行层兑现,不逐条下发
fn is_transaction_marker(statement: &str) -> bool {
    let upper = statement.trim_start().to_ascii_uppercase();
    upper.starts_with("START TRANSACTION")
        || upper.starts_with("SET ")
        || upper.starts_with("COMMIT")
}
