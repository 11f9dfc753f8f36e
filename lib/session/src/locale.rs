//! Locale-dependent interface text.

use krx_chat_core::Language;

/// Interface strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub placeholder: &'static str,
    pub send: &'static str,
    pub new_chat: &'static str,
    pub thinking: &'static str,
    pub error: &'static str,
    pub welcome: &'static str,
    pub connection_error: &'static str,
    pub timeout: &'static str,
    pub network_hint: &'static str,
}

const KOREAN: LocaleText = LocaleText {
    title: "AI 투자 어시스턴트",
    subtitle: "섹터 로테이션 Q&A",
    placeholder: "질문을 입력하세요...",
    send: "전송",
    new_chat: "새 대화",
    thinking: "답변 생성 중...",
    error: "오류가 발생했습니다. 다시 시도해주세요.",
    welcome: "안녕하세요! KRX 섹터 로테이션 분석에 대해 질문해주세요.\n\n예시 질문:\n• 오늘 모멘텀 상위 종목은?\n• TIER 1 테마는 무엇인가요?\n• 군집성이 가장 강한 테마는?",
    connection_error: "API 연결에 실패했습니다.",
    timeout: "응답 시간이 초과되었습니다.",
    network_hint: "[네트워크 오류 - 연결을 확인하세요]",
};

const ENGLISH: LocaleText = LocaleText {
    title: "AI Investment Assistant",
    subtitle: "Sector Rotation Q&A",
    placeholder: "Type your question...",
    send: "Send",
    new_chat: "New Chat",
    thinking: "Generating response...",
    error: "An error occurred. Please try again.",
    welcome: "Hello! Ask me about KRX Sector Rotation analysis.\n\nExample questions:\n• Which stocks have highest momentum today?\n• What are the TIER 1 themes?\n• Which themes have strongest cohesion?",
    connection_error: "Failed to connect to API.",
    timeout: "The request timed out.",
    network_hint: "[Network error - check connection]",
};

impl LocaleText {
    /// Returns the strings for a language.
    #[must_use]
    pub fn for_language(language: Language) -> &'static Self {
        match language {
            Language::Korean => &KOREAN,
            Language::English => &ENGLISH,
        }
    }

    /// Returns the strings for a language code, falling back to Korean.
    #[must_use]
    pub fn for_code(code: &str) -> &'static Self {
        Self::for_language(Language::from_code_or_default(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_language() {
        assert_eq!(LocaleText::for_language(Language::English).send, "Send");
        assert_eq!(LocaleText::for_language(Language::Korean).send, "전송");
    }

    #[test]
    fn unknown_code_falls_back_to_korean() {
        assert_eq!(LocaleText::for_code("fr"), LocaleText::for_language(Language::Korean));
        assert_eq!(LocaleText::for_code("EN").new_chat, "New Chat");
    }

    #[test]
    fn every_string_is_present() {
        for text in [&KOREAN, &ENGLISH] {
            for value in [
                text.title,
                text.subtitle,
                text.placeholder,
                text.send,
                text.new_chat,
                text.thinking,
                text.error,
                text.welcome,
                text.connection_error,
                text.timeout,
                text.network_hint,
            ] {
                assert!(!value.is_empty());
            }
        }
    }
}
