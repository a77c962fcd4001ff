//! Tokenizer for the ISC dhcpd dialect shared by `dhcpd.leases` and
//! `dhcpd.conf` style reservation files.

use hostmap_common::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Quoted(&'a str),
    Open,
    Close,
    Semi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub line: usize,
}

/// Splits `text` into tokens.
///
/// `#` starts a comment running to the end of the line. Braces are checked
/// for balance so callers can rely on every `Open` having a matching `Close`.
/// Inside a quoted string a backslash escapes the next byte, so `\"` and `\\`
/// never end the string; the token keeps the escapes verbatim.
pub fn tokenize(text: &str) -> Result<Vec<Spanned<'_>>, ParseError> {
    let scan = scan(text)?;
    match scan.truncated {
        Some(e) => Err(e),
        None => Ok(scan.tokens),
    }
}

/// Tokenizes an append-only journal that may have been read mid-write.
///
/// A text that ends inside its last top-level statement (an open block or an
/// unterminated string) keeps every complete statement before it; the error
/// describing the cut-off tail is handed back alongside. A stray `}` is still
/// a hard error.
pub fn tokenize_journal(text: &str) -> Result<(Vec<Spanned<'_>>, Option<ParseError>), ParseError> {
    let mut scan = scan(text)?;
    if scan.truncated.is_some() {
        scan.tokens.truncate(scan.complete);
    }
    Ok((scan.tokens, scan.truncated))
}

struct Scan<'a> {
    tokens: Vec<Spanned<'a>>,
    /// Token count up to the end of the last complete top-level statement.
    complete: usize,
    /// Set when the text ends inside a string or an open block.
    truncated: Option<ParseError>,
}

fn scan(text: &str) -> Result<Scan<'_>, ParseError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut depth: Vec<usize> = Vec::new();
    let mut complete = 0;
    let mut line = 1;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'\n' => {
                line += 1;
                i += 1;
            }
            b if b.is_ascii_whitespace() => i += 1,
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'"' => {
                let start_line = line;
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != b'"' {
                    match bytes[end] {
                        b'\\' => end += 1,
                        b'\n' => line += 1,
                        _ => {}
                    }
                    end += 1;
                }
                if end >= bytes.len() {
                    return Ok(Scan {
                        tokens,
                        complete,
                        truncated: Some(ParseError::UnterminatedString { line: start_line }),
                    });
                }
                tokens.push(Spanned {
                    token: Token::Quoted(&text[start..end]),
                    line: start_line,
                });
                i = end + 1;
            }
            b'{' => {
                depth.push(line);
                tokens.push(Spanned { token: Token::Open, line });
                i += 1;
            }
            b'}' => {
                if depth.pop().is_none() {
                    return Err(ParseError::UnbalancedBrace { brace: '}', line });
                }
                tokens.push(Spanned { token: Token::Close, line });
                i += 1;
            }
            b';' => {
                tokens.push(Spanned { token: Token::Semi, line });
                i += 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !is_delimiter(bytes[i]) {
                    i += 1;
                }
                tokens.push(Spanned {
                    token: Token::Word(&text[start..i]),
                    line,
                });
            }
        }

        let closed = matches!(
            tokens.last(),
            Some(Spanned {
                token: Token::Close | Token::Semi,
                ..
            })
        );
        if closed && depth.is_empty() {
            complete = tokens.len();
        }
    }

    let truncated = depth.first().map(|&open_line| ParseError::UnbalancedBrace {
        brace: '{',
        line: open_line,
    });

    Ok(Scan {
        tokens,
        complete,
        truncated,
    })
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b';' | b'"' | b'#')
}

/// One `keyword argument {` header with the tokens of its body.
///
/// The body excludes the outer braces and may contain nested blocks.
#[derive(Debug)]
pub struct Block<'t, 'a> {
    pub argument: Token<'a>,
    pub body: &'t [Spanned<'a>],
}

impl<'t, 'a> Block<'t, 'a> {
    /// Finds the first top-level `keyword value ... ;` statement of the body
    /// and returns its first value token.
    pub fn statement(&self, keyword: &str) -> Option<&'t Token<'a>> {
        let mut depth = 0usize;
        let mut at_statement_start = true;
        let body = self.body;

        for (idx, spanned) in body.iter().enumerate() {
            match &spanned.token {
                Token::Open => depth += 1,
                Token::Close => depth = depth.saturating_sub(1),
                Token::Semi => {}
                Token::Word(word) if depth == 0 && at_statement_start && *word == keyword => {
                    return body.get(idx + 1).map(|next| &next.token);
                }
                _ => {}
            }
            at_statement_start = matches!(spanned.token, Token::Semi | Token::Open | Token::Close);
        }
        None
    }
}

/// Collects every `keyword <argument> { … }` block, at any nesting depth.
///
/// Tokens must come from [`tokenize`], which guarantees balanced braces.
pub fn blocks<'t, 'a>(tokens: &'t [Spanned<'a>], keyword: &str) -> Vec<Block<'t, 'a>> {
    let mut found = Vec::new();
    let mut i = 0;

    while i + 2 < tokens.len() {
        let is_header = matches!(tokens[i].token, Token::Word(word) if word == keyword)
            && matches!(tokens[i + 1].token, Token::Word(_) | Token::Quoted(_))
            && tokens[i + 2].token == Token::Open;

        if !is_header {
            i += 1;
            continue;
        }

        let body_start = i + 3;
        let body_end = matching_close(tokens, body_start).unwrap_or(tokens.len());
        found.push(Block {
            argument: tokens[i + 1].token.clone(),
            body: &tokens[body_start..body_end],
        });
        i = body_end;
    }

    found
}

fn matching_close(tokens: &[Spanned<'_>], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, spanned) in tokens[from..].iter().enumerate() {
        match spanned.token {
            Token::Open => depth += 1,
            Token::Close if depth == 0 => return Some(from + offset),
            Token::Close => depth -= 1,
            _ => {}
        }
    }
    None
}
