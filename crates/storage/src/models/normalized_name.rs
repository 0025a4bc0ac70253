/// A player name reduced to a comparison key so that "Jan Novák",
/// "NOVAK Jan" and "novak,  jan" all compare equal.
///
/// Tokens are lowercased, common Latin diacritics are folded to ASCII,
/// punctuation is dropped and the tokens are sorted, which makes the key
/// independent of first/last name order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPlayerName {
    tokens: Vec<String>,
}

impl NormalizedPlayerName {
    /// # Examples
    ///
    /// ```
    /// use storage::models::NormalizedPlayerName;
    ///
    /// let a = NormalizedPlayerName::new("Jan Novák");
    /// let b = NormalizedPlayerName::new("NOVAK, Jan");
    ///
    /// assert_eq!(a, b);
    /// assert_eq!(a.key(), "jan novak");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut tokens: Vec<String> = name
            .split(|c: char| c.is_whitespace() || c == ',' || c == '-' || c == '.')
            .map(|token| {
                let mut folded = String::with_capacity(token.len());
                for c in token.chars().flat_map(char::to_lowercase) {
                    match fold_ligature(c) {
                        Some(letters) => folded.push_str(letters),
                        None => folded.push(fold_diacritic(c)),
                    }
                }
                folded.retain(char::is_alphanumeric);
                folded
            })
            .filter(|token| !token.is_empty())
            .collect();

        tokens.sort();

        Self { tokens }
    }

    pub fn key(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Letters that spell out as more than one ASCII letter.
fn fold_ligature(c: char) -> Option<&'static str> {
    match c {
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'þ' => Some("th"),
        'ĳ' => Some("ij"),
        _ => None,
    }
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ą' | 'ă' => 'a',
        'ç' | 'č' | 'ć' | 'ĉ' | 'ċ' => 'c',
        'ď' | 'đ' | 'ð' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ě' | 'ē' | 'ę' | 'ė' => 'e',
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => 'g',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ı' | 'į' => 'i',
        'ķ' => 'k',
        'ł' | 'ľ' | 'ĺ' | 'ļ' => 'l',
        'ñ' | 'ň' | 'ń' | 'ņ' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' | 'ŕ' => 'r',
        'š' | 'ś' | 'ş' | 'ș' | 'ŝ' => 's',
        'ť' | 'ţ' | 'ț' => 't',
        'ú' | 'ù' | 'û' | 'ü' | 'ů' | 'ū' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_ignores_order() {
        let a = NormalizedPlayerName::new("Anna Berg");
        let b = NormalizedPlayerName::new("Berg Anna");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalization_folds_case_and_accents() {
        let name = NormalizedPlayerName::new("  ŠTĚPÁN   Dvořák ");
        assert_eq!(name.key(), "dvorak stepan");
    }

    #[test]
    fn test_normalization_spells_out_ligatures() {
        assert_eq!(NormalizedPlayerName::new("Jonas Straße").key(), "jonas strasse");
        assert_eq!(
            NormalizedPlayerName::new("Søren Ærø"),
            NormalizedPlayerName::new("Soren Aero")
        );
    }

    #[test]
    fn test_normalization_folds_turkish_letters() {
        assert_eq!(
            NormalizedPlayerName::new("Çağlar Işık"),
            NormalizedPlayerName::new("Caglar Isik")
        );
    }

    #[test]
    fn test_normalization_drops_punctuation() {
        let name = NormalizedPlayerName::new("O'Neil, J.");
        assert_eq!(name.tokens(), &["j".to_string(), "oneil".to_string()]);
    }

    #[test]
    fn test_blank_name_is_empty() {
        assert!(NormalizedPlayerName::new(" , - ").is_empty());
    }
}
