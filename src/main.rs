// ==========================================
// 药理学数据导入系统 - 命令行入口
// ==========================================
// 用法: molecule-importer <molecules.csv> [sqlite.db]
// 仅传 CSV 时输出脚本到标准输出;附带数据库路径时直接执行
// ==========================================

use molecule_importer::{logging, ImportRepository, MoleculeImporter, MoleculeImporterImpl};
use tracing::error;

#[tokio::main]
async fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("用法: molecule-importer <molecules.csv> [sqlite.db]");
        std::process::exit(2);
    }

    let importer = MoleculeImporterImpl::new();
    let outcome = match importer.import_from_csv(&args[1]).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "导入失败");
            std::process::exit(1);
        }
    };

    match args.get(2) {
        Some(db_path) => {
            if let Err(e) = execute(db_path, &outcome.statements) {
                error!(error = %e, db = %db_path, "脚本执行失败");
                std::process::exit(1);
            }
        }
        None => println!("{}", outcome.script),
    }

    eprintln!(
        "{}",
        serde_json::to_string_pretty(&outcome.report).unwrap_or_default()
    );
}

fn execute(db_path: &str, statements: &[String]) -> molecule_importer::ImportResult<()> {
    let mut repo = ImportRepository::new(db_path)?;
    repo.init_schema()?;
    repo.execute_script(statements)?;
    Ok(())
}
