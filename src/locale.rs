// ==========================================
// 采购需求分析系统 - pt-BR 本地化工具
// ==========================================
// 职责: 日期解析 / 交期天数 / 巴西数字格式的解析与渲染
// 口径: 日期固定 dd/MM/yyyy；数字千分位 '.'、小数位 ','
// ==========================================

use chrono::NaiveDate;
use std::cmp::Ordering;

/// 源系统日期格式（Sienge 导出固定为 dd/MM/yyyy）
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// 月份缩写查找表（pt-BR，用于月度序列的序号排序）
pub const MONTH_ABBR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// 星期名称（pt-BR，周日为 0）
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

// ==========================================
// 日期解析
// ==========================================

/// 按固定格式严格解析日期
///
/// 空串 / 格式不符 → None（调用方把"缺失"与"非法"同等对待）
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// 判断日期字符串是否早于指定日（严格小于）
///
/// 无法解析 → false
pub fn is_before_day(s: &str, day: NaiveDate) -> bool {
    match parse_date(s) {
        Some(date) => date < day,
        None => false,
    }
}

/// 判断日期字符串是否早于今天（本地日历日）
pub fn is_before_today(s: &str) -> bool {
    is_before_day(s, chrono::Local::now().date_naive())
}

/// 计算两个日期字符串之间的交期天数
///
/// 任一端无法解析，或 end 早于 start（录入倒挂）→ None
pub fn lead_time_days(start: &str, end: &str) -> Option<i64> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if end_date < start_date {
        return None;
    }
    Some((end_date - start_date).num_days())
}

// ==========================================
// 数字解析
// ==========================================

/// 解析巴西格式数字（"R$ 1.234,56" → 1234.56）
///
/// 步骤: 去货币符号与空白 → 去千分位 '.' → 小数位 ',' 换 '.' → 解析
/// 任何失败 → 0.0（不报错）
pub fn parse_locale_number(s: &str) -> f64 {
    let cleaned = s.replacen("R$", "", 1);
    let cleaned = cleaned.trim().replace('.', "").replace(',', ".");
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

// ==========================================
// 数字格式化
// ==========================================

/// 整数部分千分位分组（'.' 分隔）
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }
    grouped
}

/// 按 pt-BR 格式渲染定点小数（内部）
fn format_fixed(value: f64, decimals: usize) -> String {
    let negative = value.is_sign_negative() && value != 0.0;
    let fixed = format!("{:.*}", decimals, value.abs());
    let mut parts = fixed.split('.');
    let int_part = group_thousands(parts.next().unwrap_or("0"));
    let rendered = match parts.next() {
        Some(frac) if decimals > 0 => format!("{},{}", int_part, frac),
        _ => int_part,
    };
    if negative {
        format!("-{}", rendered)
    } else {
        rendered
    }
}

/// 货币格式（"R$ 1.234,56"，固定 2 位小数）
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_fixed(value, 2))
}

/// 无符号定点格式（"1.234,56"，固定 2 位小数；CSV 导出口径）
pub fn format_decimal(value: f64) -> String {
    format_fixed(value, 2)
}

/// 通用数字格式（千分位分组，最多 2 位小数，去尾零）
pub fn format_number(value: f64) -> String {
    let rendered = format_fixed(value, 2);
    match rendered.find(',') {
        Some(_) => {
            let trimmed = rendered.trim_end_matches('0').trim_end_matches(',');
            trimmed.to_string()
        }
        None => rendered,
    }
}

/// 比率 KPI 格式（1 位小数；分母为零 → "N/A" 哨兵）
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => crate::i18n::t("common.not_applicable"),
    }
}

// ==========================================
// 月度标签
// ==========================================

/// 生成月度标签（"MMM/yy"，如 "jan/25"）
pub fn month_label(date: NaiveDate) -> String {
    use chrono::Datelike;
    let abbr = MONTH_ABBR[(date.month0()) as usize];
    format!("{}/{:02}", abbr, date.year() % 100)
}

/// 解析月度标签为 (年, 月序号)
///
/// 缩写为本地化文本，不能按字典序排序；必须经查找表取序号
fn month_label_ordinal(label: &str) -> (i32, usize) {
    let abbr = label.get(..3).unwrap_or("").to_lowercase();
    let ordinal = MONTH_ABBR
        .iter()
        .position(|m| *m == abbr)
        .unwrap_or(0);
    let year: i32 = label
        .rsplit('/')
        .next()
        .and_then(|y| y.parse().ok())
        .unwrap_or(0);
    (2000 + year, ordinal)
}

/// 月度标签比较器（按年 + 月序号，绝不按字符串）
pub fn compare_month_labels(a: &str, b: &str) -> Ordering {
    month_label_ordinal(a).cmp(&month_label_ordinal(b))
}
