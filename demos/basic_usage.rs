/// Basic usage: list cats, create one, play with it, feed it and check stats.
///
/// Reads `PURRR_LOVE_API_KEY` and optionally `PURRR_LOVE_BASE_URL`.
use purrr_love_sdk::{
    CareType, CatBreed, ClientConfig, GameType, NewCat, Params, PersonalityType, PurrrClient,
    PurrrError,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env();
    if config.api_key.is_none() {
        eprintln!("Set PURRR_LOVE_API_KEY to run this demo");
        return Ok(());
    }
    println!("Connecting to {}...", config.base_url);
    let client = PurrrClient::new(config)?;

    // 1. List existing cats
    let cats = client.get_cats(10, 0).await?;
    println!("You have {} cat(s)", cats.len());
    for cat in &cats {
        println!(
            "  {} the {} (level {}, mood {})",
            cat.name, cat.breed, cat.level, cat.mood
        );
    }

    // 2. Reuse the first cat or create one
    let cat = match cats.into_iter().next() {
        Some(cat) => cat,
        None => {
            println!("\nCreating a cat...");
            let new_cat = NewCat::new("Whiskers", "cat", PersonalityType::Playful)
                .breed(CatBreed::MaineCoon);
            client.create_cat(&new_cat).await?
        }
    };
    println!("\nUsing {} (id {})", cat.name, cat.id);

    // 3. Play a game
    match client.play_with_cat(cat.id, GameType::LaserPointer, 10).await {
        Ok(result) => println!("Play result: {result}"),
        Err(PurrrError::RateLimit { retry_after, .. }) => {
            println!("Rate limited, try again in {retry_after}s");
        }
        Err(e) => return Err(e.into()),
    }

    // 4. Feed the cat
    let mut food = Params::new();
    food.insert("food_type".into(), json!("premium_cat_food"));
    food.insert("amount".into(), json!("1_cup"));
    let care = client.care_for_cat(cat.id, CareType::Feeding, &food).await?;
    println!("Care result: {care}");

    // 5. Refresh and show stats
    let cat = client.get_cat(cat.id).await?;
    println!(
        "\n{}: health {} hunger {} happiness {} energy {}",
        cat.name, cat.health, cat.hunger, cat.happiness, cat.energy
    );

    let stats = client.get_user_stats().await?;
    println!("User stats: {stats}");

    Ok(())
}
