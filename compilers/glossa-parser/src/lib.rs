pub mod parser;
pub mod token;

use glossa_protocol::TokenSpan;

use crate::parser::{parse_with_spans, RawToken};
use crate::token::{Token, TokenKind};

/// Primary entry point: Text -> Structured Tokens
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    parse_with_spans(input)
        .into_iter()
        .filter_map(|(span, raw)| {
            let text = &input[span.start..span.end];

            let kind = match raw {
                RawToken::Punct(c) => TokenKind::Punctuation(c),
                RawToken::Word(_) => TokenKind::Word,
                // An elision apostrophe only separates host from clitic.
                RawToken::Elision => return None,
            };

            Some(Token { span, text, kind })
        })
        .collect()
}

/// The word-token sequence the analysis engine consumes.
pub fn word_spans(input: &str) -> Vec<TokenSpan<'_>> {
    tokenize(input)
        .iter()
        .filter_map(Token::as_word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_spans() {
        let input = "Ο άνθρωπος διαβάζει.";
        let tokens = tokenize(input);

        assert_eq!(tokens.len(), 4);

        assert_eq!(tokens[0].text, "Ο");
        assert_eq!(tokens[0].kind, TokenKind::Word);

        assert_eq!(tokens[1].text, "άνθρωπος");
        assert_eq!(&input[tokens[1].span.start..tokens[1].span.end], "άνθρωπος");

        assert_eq!(tokens[2].text, "διαβάζει");

        assert_eq!(tokens[3].kind, TokenKind::Punctuation('.'));
    }

    #[test]
    fn punctuation_is_filtered_from_word_spans() {
        let spans = word_spans("Έρχομαι.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Έρχομαι");
    }

    #[test]
    fn elision_splits_host_and_clitic() {
        // Phonological fusion is an orthographic fact; the clitic stays a
        // token of its own.
        let spans = word_spans("δώσ'το");
        let texts: Vec<&str> = spans.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["δώσ", "το"]);
    }

    #[test]
    fn greek_question_mark_is_punctuation() {
        let tokens = tokenize("ποιος ήρθε;");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Punctuation(';'));
    }
}
