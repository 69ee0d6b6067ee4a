// ==========================================
// 采购需求分析系统 - 开发外壳入口
// ==========================================
// 用途: 本地验证导入管道与聚合引擎；
//       正式展示层（浏览器看板）为外部协作方
// ==========================================

use procurement_analytics::{AnalysisConfig, DashboardApi};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    procurement_analytics::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", procurement_analytics::APP_NAME);
    tracing::info!("系统版本: {}", procurement_analytics::VERSION);
    tracing::info!("==================================================");

    let path: PathBuf = match std::env::args().nth(1) {
        Some(arg) => arg.into(),
        None => {
            eprintln!("用法: procurement-analytics <demandas.csv>");
            std::process::exit(2);
        }
    };

    let mut api = DashboardApi::new(AnalysisConfig::default());
    let report = match api.load_csv_file(&path) {
        Ok(report) => report,
        Err(err) => {
            // 用户可见通知为一次性文案（已本地化）
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    tracing::info!(
        total = report.total_rows,
        valid = report.valid_rows,
        dropped = report.dropped_rows,
        "导入完成"
    );

    let view = api.overview();
    println!("Lead Time Total Médio:   {} dias", view.average_total_lead_time);
    println!("Lead Time Interno:       {} dias", view.average_internal_lead_time);
    println!("Lead Time Externo:       {} dias", view.average_external_lead_time);
    println!("Entrega no Prazo (OTD):  {}%", view.otd_rate);
    println!("Taxa de Atendimento:     {}%", view.order_fill_rate);

    let financial = api.financial();
    println!("Valor Total Faturado:    {}", financial.total_invoiced);
    for point in financial.spend_by_project.iter() {
        println!(
            "  {}: {}",
            point.name,
            procurement_analytics::locale::format_currency(point.value)
        );
    }

    Ok(())
}
