use crate::error::{Error, Result};

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 6;
const MIN_TITLE_CHARS: usize = 3;

/// Split a comma-separated ingredient parameter, trimming each entry and
/// dropping empty ones. Order is preserved.
pub fn parse_ingredient_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonical form of an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate registration fields (name and email already trimmed)
pub fn validate_registration(nome: &str, email: &str, senha: &str) -> Result<()> {
    if nome.chars().count() < MIN_NAME_CHARS {
        return Err(Error::Validation(
            "Nome deve ter pelo menos 2 caracteres".to_string(),
        ));
    }

    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation("Email inválido".to_string()));
    }

    if senha.chars().count() < MIN_PASSWORD_CHARS {
        return Err(Error::Validation(
            "Senha deve ter pelo menos 6 caracteres".to_string(),
        ));
    }

    Ok(())
}

/// Validate a user-submitted recipe (title already trimmed)
pub fn validate_new_recipe(titulo: &str, ingredientes: &[String], modo_preparo: &[String]) -> Result<()> {
    if titulo.chars().count() < MIN_TITLE_CHARS {
        return Err(Error::Validation(
            "Título deve ter pelo menos 3 caracteres".to_string(),
        ));
    }

    if ingredientes.is_empty() {
        return Err(Error::Validation(
            "Adicione pelo menos 1 ingrediente".to_string(),
        ));
    }

    if modo_preparo.is_empty() {
        return Err(Error::Validation(
            "Adicione pelo menos 1 passo no modo de preparo".to_string(),
        ));
    }

    Ok(())
}

/// Trim list entries and drop blank ones
pub fn clean_lines(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a stored newline-joined list back into entries
pub fn split_lines(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient_list() {
        assert_eq!(
            parse_ingredient_list(" arroz , feijão,,  ,ovo "),
            vec!["arroz", "feijão", "ovo"]
        );
        assert!(parse_ingredient_list(" , ,").is_empty());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Maria@Example.COM "), "maria@example.com");
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("Jo", "jo@example.com", "123456").is_ok());
        assert!(validate_registration("J", "jo@example.com", "123456").is_err());
        assert!(validate_registration("Jo", "jo.example.com", "123456").is_err());
        assert!(validate_registration("Jo", "", "123456").is_err());
        assert!(validate_registration("Jo", "jo@example.com", "12345").is_err());
        // Length is counted in characters, not bytes
        assert!(validate_registration("Zé", "ze@example.com", "çççççç").is_ok());
    }

    #[test]
    fn test_validate_new_recipe() {
        let ings = vec!["ovo".to_string()];
        let steps = vec!["bata".to_string()];
        assert!(validate_new_recipe("Omelete", &ings, &steps).is_ok());

        let err = validate_new_recipe("Ov", &ings, &steps).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Título deve ter pelo menos 3 caracteres"
        );
        assert!(validate_new_recipe("Omelete", &[], &steps).is_err());
        assert!(validate_new_recipe("Omelete", &ings, &[]).is_err());
    }

    #[test]
    fn test_line_helpers() {
        let items = vec![" ovo ".to_string(), "  ".to_string(), "sal".to_string()];
        assert_eq!(clean_lines(&items), vec!["ovo", "sal"]);

        assert_eq!(split_lines("ovo\nsal"), vec!["ovo", "sal"]);
        assert!(split_lines("").is_empty());
    }
}
