#[cfg(test)]
mod scanner_tests {
    use lox::scanner::Scanner;
    use lox::token::TokenType;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn one_and_two_character_operators() {
        assert_token_sequence(
            "! != = == < <= > >= / ;",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_token_sequence(
            "var language = lox; while fun class",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "language"),
                (TokenType::EQUAL, "="),
                (TokenType::IDENTIFIER, "lox"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::WHILE, "while"),
                (TokenType::FUN, "fun"),
                (TokenType::CLASS, "class"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn keyword_prefixed_identifier_is_an_identifier() {
        assert_token_sequence(
            "orchid android",
            &[
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::IDENTIFIER, "android"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn number_literals_carry_values() {
        let tokens: Vec<_> = Scanner::new(b"123 45.67")
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, 123.0),
            other => panic!("expected number, got {:?}", other),
        }

        match &tokens[1].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, 45.67),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn dot_without_trailing_digit_is_not_part_of_a_number() {
        assert_token_sequence(
            "123.abs",
            &[
                (TokenType::NUMBER(0.0), "123"),
                (TokenType::DOT, "."),
                (TokenType::IDENTIFIER, "abs"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn string_literal_excludes_quotes() {
        let tokens: Vec<_> = Scanner::new(br#""hello world""#)
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hello world"),
            other => panic!("expected string, got {:?}", other),
        }

        assert_eq!(tokens[0].lexeme, "\"hello world\"");
    }

    #[test]
    fn multiline_string_advances_line_counter() {
        let tokens: Vec<_> = Scanner::new(b"\"one\ntwo\"\nafter")
            .filter_map(Result::ok)
            .collect();

        // The string token is reported at the line where it ends.
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].lexeme, "after");
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let results: Vec<_> = Scanner::new(b"\"never closed").collect();

        let error = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("expected a lex error");

        assert!(format!("{}", error).contains("Unterminated string."));
    }

    #[test]
    fn line_comment_is_discarded() {
        assert_token_sequence(
            "1 // the rest is noise ====\n2",
            &[
                (TokenType::NUMBER(0.0), "1"),
                (TokenType::NUMBER(0.0), "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn block_comment_is_discarded() {
        assert_token_sequence(
            "1 /* spans\nseveral\nlines */ 2",
            &[
                (TokenType::NUMBER(0.0), "1"),
                (TokenType::NUMBER(0.0), "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn block_comment_does_not_nest() {
        // The first `*/` terminates the comment; the rest is live source.
        assert_token_sequence(
            "/* outer /* inner */ var",
            &[(TokenType::VAR, "var"), (TokenType::EOF, "")],
        );
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let results: Vec<_> = Scanner::new(b"/* no end in sight").collect();

        let error = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("expected a lex error");

        assert!(format!("{}", error).contains("Unterminated block comment."));
    }

    #[test]
    fn unexpected_character_reports_and_continues() {
        let results: Vec<_> = Scanner::new(b",$(").collect();

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(format!("{}", results[1].as_ref().unwrap_err())
            .contains("Unexpected character '$'."));

        // Scanning resumes after the bad byte.
        let tail: Vec<_> = results[2..].iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(tail[0].token_type, TokenType::LEFT_PAREN);
        assert_eq!(tail[1].token_type, TokenType::EOF);
    }

    #[test]
    fn empty_source_yields_only_eof() {
        assert_token_sequence("", &[(TokenType::EOF, "")]);
    }

    #[test]
    fn eof_carries_final_line_number() {
        let tokens: Vec<_> = Scanner::new(b"1\n2\n3\n").filter_map(Result::ok).collect();

        assert_eq!(tokens.last().map(|t| t.line), Some(4));
    }
}
