// ==========================================
// 分子导入集成测试
// ==========================================
// 测试目标: 文件 → 脚本 → 数据库的完整链路与核对回读
// ==========================================


use molecule_importer::{logging, MoleculeImporter, MoleculeImporterImpl, Property};
use test_helpers::{create_test_repo, write_csv_file};

const FIXTURE_PATH: &str = "tests/fixtures/molecules.csv";

#[tokio::test]
async fn test_import_fixture_counts() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().expect("建库失败");

    let importer = MoleculeImporterImpl::new();
    let outcome = importer
        .import_from_csv(FIXTURE_PATH)
        .await
        .expect("导入应当成功");
    repo.execute_script(&outcome.statements).expect("执行应当成功");

    // 分子行数 = 数据行数
    assert_eq!(outcome.report.molecule_count, 5);
    assert_eq!(repo.count_rows("molecule").unwrap(), 5);

    // 三张属性表与分类表
    assert_eq!(repo.count_rows("property").unwrap(), 3);
    assert_eq!(repo.count_rows("property_value").unwrap(), 14);
    assert_eq!(repo.count_rows("system").unwrap(), 6);
    assert_eq!(repo.count_rows("class").unwrap(), 9);
    assert_eq!(repo.count_rows("molecule_property").unwrap(), 18);
}

#[tokio::test]
async fn test_round_trip_molecule_data() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().expect("建库失败");

    let importer = MoleculeImporterImpl::new();
    let outcome = importer.import_from_csv(FIXTURE_PATH).await.unwrap();
    repo.execute_script(&outcome.statements).unwrap();

    let amiodarone = repo
        .molecule_by_dci("AMIODARONE")
        .unwrap()
        .expect("AMIODARONE 应当入库");
    assert_eq!(amiodarone.ntr, 1);
    assert_eq!(amiodarone.difficulty, "HARD");
    assert_eq!(amiodarone.system.as_deref(), Some("Antiarythmique"));
    assert_eq!(amiodarone.class.as_deref(), Some("Classe III"));
    assert_eq!(
        amiodarone.side_effects,
        vec!["Photosensibilisation", "Dysthyroïdie"]
    );
    assert_eq!(amiodarone.interactions, vec!["AVK", "Digoxine"]);
    assert_eq!(amiodarone.indications, vec!["Fibrillation auriculaire"]);

    let paracetamol = repo.molecule_by_dci("PARACETAMOL").unwrap().unwrap();
    assert_eq!(paracetamol.ntr, 0);
    assert_eq!(paracetamol.difficulty, "EASY");
    assert_eq!(paracetamol.system.as_deref(), Some("Douleur"));
    assert_eq!(paracetamol.indications, vec!["Douleur", "Fièvre"]);

    assert!(repo.molecule_by_dci("INCONNU").unwrap().is_none());
}

#[tokio::test]
async fn test_property_values_readback() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().unwrap();

    let importer = MoleculeImporterImpl::new();
    let outcome = importer.import_from_csv(FIXTURE_PATH).await.unwrap();
    repo.execute_script(&outcome.statements).unwrap();

    // 取值首见顺序与去重
    assert_eq!(
        repo.property_values(Property::Indications).unwrap(),
        vec!["Fibrillation auriculaire", "Douleur", "Fièvre", "Dépression"]
    );
    assert_eq!(
        repo.property_values(Property::Interactions).unwrap(),
        vec!["AVK", "Digoxine", "AINS", "Amiodarone"]
    );
    assert_eq!(repo.property_values(Property::SideEffects).unwrap().len(), 6);
}

#[tokio::test]
async fn test_classification_parents() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().unwrap();

    let importer = MoleculeImporterImpl::new();
    let outcome = importer.import_from_csv(FIXTURE_PATH).await.unwrap();
    repo.execute_script(&outcome.statements).unwrap();

    let systems = repo.classification_rows("system").unwrap();

    let cardio = systems
        .iter()
        .find(|r| r.name == "Cardiovasculaire")
        .expect("一级节点应当入库");
    assert_eq!(cardio.higher, None);
    assert_eq!(cardio.level, 1);

    // 同一根下的两个二级节点,父指针指向同一个根
    let antiarythmique = systems.iter().find(|r| r.name == "Antiarythmique").unwrap();
    let hemostase = systems.iter().find(|r| r.name == "Hémostase").unwrap();
    assert_eq!(antiarythmique.higher, Some(cardio.id));
    assert_eq!(hemostase.higher, Some(cardio.id));
    assert_eq!(antiarythmique.level, 2);

    // Antalgiques 被两行引用,只建一个节点
    let classes = repo.classification_rows("class").unwrap();
    let antalgiques: Vec<_> = classes.iter().filter(|r| r.name == "Antalgiques").collect();
    assert_eq!(antalgiques.len(), 1);
}

#[tokio::test]
async fn test_shared_root_not_duplicated() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().unwrap();

    let csv = write_csv_file(
        "DCI,SYSTEME_1,SYSTEME_2,MTE\n\
         A,Cardio,Arrhythmia,0\n\
         B,Cardio,HeartFailure,0\n",
    )
    .unwrap();

    let importer = MoleculeImporterImpl::new();
    let outcome = importer.import_from_csv(csv.path()).await.unwrap();
    repo.execute_script(&outcome.statements).unwrap();

    let systems = repo.classification_rows("system").unwrap();
    let roots: Vec<_> = systems.iter().filter(|r| r.name == "Cardio").collect();
    assert_eq!(roots.len(), 1, "同名一级节点不得重复建根");

    let children: Vec<_> = systems
        .iter()
        .filter(|r| r.higher == Some(roots[0].id))
        .collect();
    assert_eq!(children.len(), 2);
}

#[tokio::test]
async fn test_malformed_mte_aborts_whole_import() {
    logging::init_test();

    let csv = write_csv_file(
        "DCI,MTE\n\
         A,1\n\
         B,abc\n",
    )
    .unwrap();

    let importer = MoleculeImporterImpl::new();
    let result = importer.import_from_csv(csv.path()).await;

    // 无部分脚本返回,单行错误使整次导入失效
    assert!(result.is_err());
}

#[tokio::test]
async fn test_in_cell_separator_yields_two_join_rows() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().unwrap();

    let csv = write_csv_file(
        "DCI,MTE,INDICATION\n\
         A,0,Fibrillation auriculaire;Angor\n",
    )
    .unwrap();

    let importer = MoleculeImporterImpl::new();
    let outcome = importer.import_from_csv(csv.path()).await.unwrap();
    repo.execute_script(&outcome.statements).unwrap();

    assert_eq!(repo.count_rows("molecule_property").unwrap(), 2);

    let molecule = repo.molecule_by_dci("A").unwrap().unwrap();
    assert_eq!(
        molecule.indications,
        vec!["Fibrillation auriculaire", "Angor"]
    );
}

#[tokio::test]
async fn test_reimport_fully_replaces_dataset() {
    logging::init_test();
    let (_db_file, mut repo) = create_test_repo().unwrap();
    let importer = MoleculeImporterImpl::new();

    // 首次导入完整数据集
    let first = importer.import_from_csv(FIXTURE_PATH).await.unwrap();
    repo.execute_script(&first.statements).unwrap();
    assert_eq!(repo.count_rows("molecule").unwrap(), 5);

    // 再次导入一个更小的数据集: 全量替换而非合并
    let csv = write_csv_file(
        "DCI,SYSTEME_1,MTE,INDICATION\n\
         NOUVELLE,Cardio,0,Angor\n",
    )
    .unwrap();
    let second = importer.import_from_csv(csv.path()).await.unwrap();
    repo.execute_script(&second.statements).unwrap();

    assert_eq!(repo.count_rows("molecule").unwrap(), 1);
    assert_eq!(repo.count_rows("system").unwrap(), 1);
    assert!(repo.molecule_by_dci("AMIODARONE").unwrap().is_none());
    assert!(repo.molecule_by_dci("NOUVELLE").unwrap().is_some());
}
