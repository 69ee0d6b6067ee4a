// ==========================================
// 采购需求分析系统 - 看板 API 端到端测试
// ==========================================
// 覆盖: 上传 → 过滤 → 视图模型 → 导出 全流程
// ==========================================

use procurement_analytics::api::{ExportApi, ExportField, ExportOptions};
use procurement_analytics::engine::FilterSpec;
use procurement_analytics::{AnalysisConfig, DashboardApi};
use std::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;

// ==========================================
// 辅助函数: 构造统一需求报表
// ==========================================
fn create_scenario_csv() -> Result<NamedTempFile, Box<dyn Error>> {
    let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile()?;

    writeln!(
        temp_file,
        "Nº da Solicitação;N° do Pedido;Descrição do insumo;Situação da solicitação;\
         Data da solicitação;Data do pedido;Previsão de entrega;Data de entrega;\
         Comprador distribuído;Obra;Fornecedor;Situação do pedido;Situação da entrega;\
         Valor da nota;Quantidade solicitada;Quantidade entregue;Saldo"
    )?;

    // 行1: 仅申购
    writeln!(
        temp_file,
        "SOL-001;;Cimento;Solicitado;05/01/2024;;;;Carlos;Obra Alfa;;;;0,00;10;0;10"
    )?;
    // 行2: 仅订单（直接下单）
    writeln!(
        temp_file,
        ";PED-100;Areia;;;06/01/2024;10/01/2024;09/01/2024;Nenhum;Obra Alfa;ACME Ltda;\
         Totalmente Entregue;Entregue;500,00;5;5;0"
    )?;
    // 行3: 无标识（被丢弃）
    writeln!(
        temp_file,
        ";;Brita;;;;;;Maria;Obra Beta;Sul;;;77,00;1;0;1"
    )?;
    // 行4: 全链路记录（按时交付）
    writeln!(
        temp_file,
        "SOL-002;PED-101;Vergalhão;Totalmente atendida;01/01/2024;03/01/2024;12/01/2024;\
         10/01/2024;Carlos;Obra Alfa;ACME Ltda;Totalmente Entregue;Entregue;1.500,00;20;20;0"
    )?;
    // 行5: 全链路记录（延迟交付）
    writeln!(
        temp_file,
        "SOL-003;PED-102;Tubo PVC;Totalmente atendida;02/01/2024;04/01/2024;10/01/2024;\
         15/01/2024;Maria;Obra Alfa;Sul Materiais;Parcialmente entregue;Aguardando entrega;250,00;8;4;4"
    )?;

    Ok(temp_file)
}

fn loaded_api() -> (DashboardApi, NamedTempFile) {
    let file = create_scenario_csv().unwrap();
    let mut api = DashboardApi::new(AnalysisConfig::default());
    api.load_csv_file(file.path()).unwrap();
    (api, file)
}

// ==========================================
// 端到端场景（上传 → 规范化计数 → 支出聚合）
// ==========================================
#[test]
fn test_upload_scenario() {
    let file = create_scenario_csv().unwrap();
    let mut api = DashboardApi::new(AnalysisConfig::default());
    let report = api.load_csv_file(file.path()).unwrap();

    // 5 行中 1 行无标识 → 4 条有效记录
    assert_eq!(report.total_rows, 5);
    assert_eq!(report.valid_rows, 4);
    assert_eq!(api.record_count(), 4);

    // Obra Alfa 支出 = 500 + 1500 + 250 = 2250
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let metrics = api.metrics_at(today);
    let alfa = metrics
        .spend
        .by_project
        .iter()
        .find(|p| p.name == "Obra Alfa")
        .unwrap();
    assert_eq!(alfa.value, 2250.0);
}

// ==========================================
// 视图模型
// ==========================================
#[test]
fn test_overview_view() {
    let (api, _file) = loaded_api();
    let view = api.overview();

    // OTD: 3 条样本（行2/行4 按时，行5 延迟）→ 66.7%
    assert_eq!(view.otd_rate, "66.7");
    // 订单履约: PED-100/101 完全交付，PED-102 部分 → 2/3
    assert_eq!(view.order_fill_rate, "66.7");
    // 延迟供应商: Sul Materiais 计 1 次
    assert_eq!(view.top_delayed_suppliers.len(), 1);
    assert_eq!(view.top_delayed_suppliers[0].name, "Sul Materiais");

    // 总交期样本: 行4 (9 天) + 行5 (13 天) → 11.0
    assert_eq!(view.average_total_lead_time, "11.0");
}

#[test]
fn test_financial_view() {
    let (api, _file) = loaded_api();
    let view = api.financial();

    assert_eq!(view.total_invoiced, "R$ 2.250,00");
    assert_eq!(view.average_item_value, "R$ 750,00");
    assert_eq!(view.spend_by_project[0].name, "Obra Alfa");
    // ABC 曲线: Vergalhão (1500) 累计 66.7%
    assert_eq!(view.pareto_by_item[0].name, "Vergalhão");
    assert!((view.pareto_by_item[0].cumulative_pct - 1500.0 / 2250.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_pendencies_view() {
    let (api, _file) = loaded_api();
    let view = api.pendencies();

    // 申购侧: SOL-001/002/003；2 条已转化 → 66.7%
    assert_eq!(view.conversion_rate, "66.7");
    assert_eq!(view.pending_request_count, 1);
    assert_eq!(view.direct_order_count, 1);

    // 漏斗降序
    for pair in view.funnel.windows(2) {
        assert!(pair[0].value >= pair[1].value);
    }
}

// ==========================================
// 过滤级联
// ==========================================
#[test]
fn test_filter_cascades_into_views() {
    let (mut api, _file) = loaded_api();

    api.set_filters(FilterSpec {
        responsible: "Carlos".to_string(),
        ..Default::default()
    });

    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let metrics = api.metrics_at(today);
    // Carlos 名下: SOL-001 (0,00) + SOL-002 (1.500,00)
    assert_eq!(metrics.spend.total_invoiced, 1500.0);

    // 选择器可选值基于全量数据，不受当前过滤影响
    let options = api.filter_options();
    assert_eq!(options.responsibles, vec!["Carlos", "Maria"]);
    assert_eq!(
        options.suppliers,
        vec!["ACME Ltda", "Sul Materiais"]
    );
}

// ==========================================
// 导出契约
// ==========================================
#[test]
fn test_csv_export_roundtrip_fields() {
    let (api, _file) = loaded_api();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let metrics = api.metrics_at(today);

    // 导出待办申购清单
    let options = ExportOptions {
        title: "Solicitações Pendentes".to_string(),
        headers: vec![
            "Nº da Solicitação".to_string(),
            "Insumo".to_string(),
            "Valor".to_string(),
        ],
        fields: vec![
            ExportField::RequestNumber,
            ExportField::ItemDescription,
            ExportField::InvoiceValue,
        ],
    };

    let mut buffer = Vec::new();
    ExportApi::new()
        .export_csv(&metrics.activity.pending_requests, &options, &mut buffer)
        .unwrap();
    let output = String::from_utf8(buffer).unwrap();

    assert!(output.contains("\"SOL-001\";\"Cimento\";\"0,00\""));

    // PDF 侧: 表格报告契约（货币格式）
    let report = ExportApi::new()
        .tabular_report(&metrics.activity.pending_requests, &options)
        .unwrap();
    assert_eq!(report.rows[0][2], "R$ 0,00");
}

// ==========================================
// 重置
// ==========================================
#[test]
fn test_reset_clears_session() {
    let (mut api, _file) = loaded_api();
    assert!(api.has_data());

    api.reset();
    assert!(!api.has_data());
    assert_eq!(api.file_name(), None);
    assert_eq!(api.filters(), &FilterSpec::default());
}
