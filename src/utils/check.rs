// 节点在余额不足时返回的错误片段（dry run 的 effects 与广播阶段的 RPC 错误都可能出现）
const INSUFFICIENT_GAS_MARKERS: [&str; 4] = [
    "insufficientgas",
    "gasbalancetoolow",
    "insufficientcoinbalance",
    "balance of gas object",
];

/// 判断错误文本是否表示发送方余额不足以支付 gas + 支付金额
pub fn is_insufficient_gas(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    INSUFFICIENT_GAS_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Move 标识符：字母或下划线开头，其余为字母数字下划线
pub fn is_valid_move_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    // 单独的 "_" 不是合法标识符
    ident != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
