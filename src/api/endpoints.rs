//! URL builders for the Riot endpoints this pipeline consumes. Account and
//! match data live on continental clusters, summoner data on the platform
//! host for the player's region.

/// Maps a platform region (na1, euw1, ...) to its continental routing
/// cluster. Unknown regions fall back to americas.
pub fn regional_routing(region: &str) -> &'static str {
    match region {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas",
    }
}

pub fn account_by_riot_id(region: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
        regional_routing(region),
        encode_segment(game_name),
        encode_segment(tag_line)
    )
}

pub fn summoner_by_puuid(region: &str, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/summoner/v4/summoners/by-puuid/{}",
        region, puuid
    )
}

pub fn match_ids_by_puuid(region: &str, puuid: &str, count: usize) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
        regional_routing(region),
        puuid,
        count
    )
}

pub fn match_by_id(region: &str, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
        regional_routing(region),
        match_id
    )
}

// Display names may contain spaces.
fn encode_segment(segment: &str) -> String {
    segment.replace(' ', "%20")
}
