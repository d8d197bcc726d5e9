use num_format::{Locale, ToFormattedString};

/// 1 SUI = 10^9 MIST
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// 将 MIST 格式化为可读的 SUI 金额，例如 20_000_000 -> "0.02 SUI"
pub fn format_mist(mist: u64) -> String {
    let whole = (mist / MIST_PER_SUI).to_formatted_string(&Locale::en);
    let frac = mist % MIST_PER_SUI;
    if frac == 0 {
        return format!("{} SUI", whole);
    }
    let frac = format!("{:09}", frac);
    format!("{}.{} SUI", whole, frac.trim_end_matches('0'))
}
