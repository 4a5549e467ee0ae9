use crate::{Error, Result};
use reqwest::Client;
use serde::Deserialize;

/// Search a running server and print the ranked page
pub async fn search(server_url: &str, ingredients: &str, page: usize) -> Result<()> {
    let results = fetch_search(server_url, ingredients, page).await?;
    print_search_results(&results);
    Ok(())
}

/// Query `GET /receitas` and decode the envelope
async fn fetch_search(server_url: &str, ingredients: &str, page: usize) -> Result<SearchResponse> {
    let client = Client::new();

    let url = format!(
        "{}/receitas?ingredientes={}&pagina={}",
        server_url.trim_end_matches('/'),
        urlencoding::encode(ingredients),
        page
    );

    let response = client.get(&url).send().await?;
    let status = response.status();

    if status.is_client_error() {
        // The server explains rejected queries in the error envelope
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|e| e.erro)
            .unwrap_or_else(|_| status.to_string());
        return Err(Error::Validation(message));
    }

    let response = response.error_for_status()?;
    Ok(response.json().await?)
}

fn print_search_results(results: &SearchResponse) {
    if results.receitas.is_empty() {
        println!("No recipes found for: {}", results.ingredientes.join(", "));
        return;
    }

    println!(
        "\nFound {} recipes with: {}\n",
        results.total,
        results.ingredientes.join(", ")
    );
    println!("{:<6} {:<50} {:<6} {:<14}", "ID", "Title", "Rating", "Reviews");
    println!("{}", "-".repeat(78));

    for recipe in &results.receitas {
        println!(
            "{:<6} {:<50} {:<6} {:<14}",
            recipe.id,
            truncate(&recipe.titulo, 48),
            recipe.nota.as_deref().unwrap_or("-"),
            truncate(recipe.avaliacoes.as_deref().unwrap_or("-"), 14)
        );
    }

    println!(
        "\nPage {} ({} shown{})",
        results.pagina,
        results.mostrando,
        if results.tem_mais { ", more available" } else { "" }
    );
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

// Response types (matching API models)

#[derive(Debug, Deserialize)]
struct SearchResponse {
    ingredientes: Vec<String>,
    pagina: usize,
    total: usize,
    mostrando: usize,
    tem_mais: bool,
    receitas: Vec<RecipeCard>,
}

#[derive(Debug, Deserialize)]
struct RecipeCard {
    id: i64,
    titulo: String,
    nota: Option<String>,
    avaliacoes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    erro: String,
}
