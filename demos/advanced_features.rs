/// Advanced features: VR sessions, AI insights, trading, shows, multiplayer,
/// health monitoring and analytics.
///
/// Each section is independent; a failure is reported and the demo moves on.
use purrr_love_sdk::{
    ClientConfig, ErrorKind, NewTradingOffer, Params, PurrrClient, PurrrError, QueryParams,
};
use rust_decimal_macros::dec;
use serde_json::json;

fn report(section: &str, err: PurrrError) {
    match err.status_kind() {
        Some(ErrorKind::NotFound) => println!("  {section} not available on this server"),
        Some(ErrorKind::Permission) => println!("  {section} needs more API key scopes"),
        _ if err.is_retryable() => println!("  {section} failed temporarily: {err}"),
        _ => println!("  {section} failed: {err}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env();
    if config.api_key.is_none() {
        eprintln!("Set PURRR_LOVE_API_KEY to run this demo");
        return Ok(());
    }
    let client = PurrrClient::new(config)?;

    let Some(cat) = client.get_cats(1, 0).await?.into_iter().next() else {
        println!("No cats yet, run the basic_usage demo first");
        return Ok(());
    };
    println!("Using {} (id {})", cat.name, cat.id);

    // VR
    println!("\nVR");
    match client.start_vr_session(cat.id, "webvr").await {
        Ok(session) => {
            let session_id = session["session_id"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            println!("  session {session_id}");
            let mut petting = Params::new();
            petting.insert("location".into(), json!("head"));
            petting.insert("intensity".into(), json!("gentle"));
            match client.vr_interact(&session_id, "petting", &petting).await {
                Ok(reply) => println!("  reaction: {}", reply["cat_reaction"]),
                Err(e) => report("VR petting", e),
            }
        }
        Err(e) => report("VR", e),
    }

    // AI learning
    println!("\nAI learning");
    match client.get_ai_insights(cat.id).await {
        Ok(insights) => println!("  progress: {}", insights["learning_progress"]),
        Err(e) => report("AI insights", e),
    }

    // Trading
    println!("\nTrading");
    let filters = QueryParams::new().push("currency", "USD");
    match client.get_trading_offers(Some(&filters)).await {
        Ok(offers) => {
            for offer in offers.iter().take(3) {
                println!(
                    "  offer {}: cat {} for {} {}",
                    offer.id, offer.cat_id, offer.price, offer.currency
                );
            }
        }
        Err(e) => report("Trading offers", e),
    }
    let offer =
        NewTradingOffer::new(cat.id, dec!(49.99)).description("Well trained and friendly");
    match client.create_trading_offer(&offer).await {
        Ok(created) => println!("  listed as offer {} ({})", created.id, created.status),
        Err(e) => report("Creating an offer", e),
    }

    // Shows
    println!("\nShows");
    match client.get_cat_shows(None).await {
        Ok(shows) => {
            if let Some(show) = shows.iter().find(|show| !show.is_full()) {
                println!("  entering {} ({})", show.name, show.show_type);
                let categories: Vec<&str> = show
                    .categories
                    .iter()
                    .map(String::as_str)
                    .take(2)
                    .collect();
                if let Err(e) = client
                    .register_cat_for_show(cat.id, show.id, &categories)
                    .await
                {
                    report("Show registration", e);
                }
            }
        }
        Err(e) => report("Shows", e),
    }

    // Multiplayer
    println!("\nMultiplayer");
    match client.join_multiplayer_room(cat.id, "playground").await {
        Ok(room) => {
            let session_id = room["session_id"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            println!("  joined {session_id}");
            let mut chase = Params::new();
            chase.insert("target".into(), json!("yarn_ball"));
            if let Err(e) = client.multiplayer_action(&session_id, "chase", &chase).await {
                report("Multiplayer action", e);
            }
        }
        Err(e) => report("Multiplayer", e),
    }

    // Health
    println!("\nHealth");
    let mut collar = Params::new();
    collar.insert("device_type".into(), json!("smart_collar"));
    collar.insert("device_name".into(), json!("PurrTrack"));
    if let Err(e) = client.register_health_device(cat.id, &collar).await {
        report("Device registration", e);
    }
    match client.get_health_summary(cat.id, "7d").await {
        Ok(summary) => println!("  summary: {summary}"),
        Err(e) => report("Health summary", e),
    }

    // Analytics
    println!("\nAnalytics");
    match client
        .get_cat_analytics(cat.id, "30d", &["happiness", "activity"])
        .await
    {
        Ok(analytics) => println!("  {analytics}"),
        Err(e) => report("Analytics", e),
    }

    Ok(())
}
