//! Provider result codes and their user-facing messages.

/// Result code of a successful call.
pub const SUCCESS_CODE: &str = "0000";

/// Friendly message for a provider `resultCode`.
///
/// Unknown codes fall back to the provider's own `resultMsg`.
pub fn friendly_message(code: &str, result_msg: Option<&str>) -> String {
    let known = match code {
        "0001" => Some("서비스 점검 중입니다. 잠시 후 다시 시도해주세요."),
        "0002" => Some("인증키 오류입니다. 관리자에게 문의해주세요."),
        "0003" => Some("필수 파라미터가 누락되었습니다."),
        "0004" | "ERROR-500" | "ERROR-600" | "ERROR-601" => {
            Some("서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.")
        }
        "0005" | "ERROR-336" => Some("데이터가 없습니다."),
        "ERROR-300" | "ERROR-301" => Some("필수 값이 누락되었습니다."),
        "ERROR-310" => Some("데이터베이스 연결 오류입니다. 잠시 후 다시 시도해주세요."),
        "ERROR-331" => Some("데이터베이스 쿼리 오류입니다. 잠시 후 다시 시도해주세요."),
        _ => None,
    };
    known.map_or_else(
        || {
            let detail = result_msg
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .unwrap_or("알 수 없는 오류");
            format!("API 오류: {detail}")
        },
        str::to_owned,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0001", "서비스 점검 중입니다. 잠시 후 다시 시도해주세요.")]
    #[case("0002", "인증키 오류입니다. 관리자에게 문의해주세요.")]
    #[case("0005", "데이터가 없습니다.")]
    #[case("ERROR-301", "필수 값이 누락되었습니다.")]
    #[case("ERROR-336", "데이터가 없습니다.")]
    #[case("ERROR-601", "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.")]
    fn known_codes_have_friendly_messages(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(friendly_message(code, Some("ignored")), expected);
    }

    #[rstest]
    #[case(Some("LIMITED_NUMBER_OF_SERVICE_REQUESTS"), "API 오류: LIMITED_NUMBER_OF_SERVICE_REQUESTS")]
    #[case(Some("  "), "API 오류: 알 수 없는 오류")]
    #[case(None, "API 오류: 알 수 없는 오류")]
    fn unknown_codes_echo_provider_message(#[case] msg: Option<&str>, #[case] expected: &str) {
        assert_eq!(friendly_message("22", msg), expected);
    }
}
