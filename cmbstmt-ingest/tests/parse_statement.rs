use cmbstmt_ingest::fragments::fragments_from_text;
use cmbstmt_ingest::{
    HEADER_KEYWORDS, ParsedStatement, ReferencePeriod, parse_cmb_credit_with_fallback,
};

/// One statement page as the extractor emits it: header block, column labels,
/// a repayment row, spending rows and a page footer.
const STATEMENT_PAGE: &str = r#"
招商银行信用卡对账单
CMB Credit Card Statement
本期账单日
2025/11/05
本期还款总额
1,233.09
交易日
记账日
交易摘要
人民币金额
卡号末四位
交易地金额
10/22
自动还款
-2,100.00
5445
10/20
10/21
拼多多支付-MAVO咖啡器具旗舰店
-254.99
5445
-254.99
10/20
10/21
支付宝-深圳市乐浦贸易有限公司
-269.00
5445
-269.00
11/02
11/03
支付宝-特约商户
38.20
5445
38.20
第 1 页 / 共 2 页
11/03
11/04
AMAZON WEB SERVICES
72.31
8812
9.99
年费
300.00
8812
"#;

fn parse_page() -> ParsedStatement {
    // Fallback far from the printed period, so any leak would show up in dates.
    parse_cmb_credit_with_fallback(&fragments_from_text(STATEMENT_PAGE), ReferencePeriod::new(2019, 6))
}

#[test]
fn test_full_page_row_count_and_headers() {
    let stmt = parse_page();
    assert_eq!(stmt.transactions.len(), 6);
    assert_eq!(stmt.headers, HEADER_KEYWORDS.map(str::to_string));
}

#[test]
fn test_full_page_repayment_row() {
    let stmt = parse_page();
    let repay = &stmt.transactions[0];
    assert_eq!(repay.original_index, 1);
    assert_eq!(repay.description, "自动还款");
    assert_eq!(repay.trans_date, "");
    assert_eq!(repay.post_date, "2025-10-22");
    assert_eq!(repay.amount_rmb, -2100.0);
    // next fragment is the following row's date
    assert_eq!(repay.original_amount, None);
}

#[test]
fn test_full_page_spending_rows() {
    let stmt = parse_page();

    let mavo = &stmt.transactions[1];
    assert_eq!(mavo.trans_date, "2025-10-20");
    assert_eq!(mavo.post_date, "2025-10-21");
    assert_eq!(mavo.amount_rmb, -254.99);
    assert_eq!(mavo.original_amount, Some(-254.99));

    let alipay = &stmt.transactions[3];
    assert_eq!(alipay.description, "支付宝-特约商户");
    assert_eq!(alipay.amount_rmb, 38.2);
    assert_eq!(alipay.card_last_four, "5445");
}

#[test]
fn test_full_page_rows_after_page_footer() {
    let stmt = parse_page();

    let aws = &stmt.transactions[4];
    assert_eq!(aws.description, "AMAZON WEB SERVICES");
    assert_eq!(aws.trans_date, "2025-11-03");
    assert_eq!(aws.card_last_four, "8812");
    assert_eq!(aws.original_amount, Some(9.99));

    let fee = &stmt.transactions[5];
    assert_eq!(fee.description, "年费");
    assert_eq!(fee.trans_date, "");
    assert_eq!(fee.post_date, "");
    assert_eq!(fee.amount_rmb, 300.0);
}

#[test]
fn test_full_page_indices_and_invariants() {
    let stmt = parse_page();
    for (i, txn) in stmt.transactions.iter().enumerate() {
        assert_eq!(txn.original_index, i + 1);
        assert_eq!(txn.card_last_four.len(), 4);
        assert!(txn.card_last_four.chars().all(|c| c.is_ascii_digit()));
        assert!(
            txn.trans_date.is_empty() || txn.trans_date != txn.post_date,
            "row {} duplicated a single date",
            txn.original_index
        );
    }
}

#[test]
fn test_reparse_is_identical() {
    assert_eq!(parse_page(), parse_page());
}
