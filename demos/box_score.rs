use anyhow::bail;
use fs_err::File;
use hoops::{box_score, League};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(league_file) = args.next() else {
        bail!("missing argument\nusage: cargo run --example box_score -- LEAGUE.JSON");
    };

    // Deserializing a League runs the consistency check, so everything below
    // can lean on references resolving.
    let league: League = serde_json::from_reader(File::open(league_file)?)?;
    let database = league.database();

    for game in database.games() {
        let score = box_score(database, game.id)?;
        println!("{}", score.info);
        println!(
            "  {} {} - {} {}",
            score.scores.away.abbreviation,
            score.scores.away.points,
            score.scores.home.abbreviation,
            score.scores.home.points,
        );
        for line in &score.lines {
            println!(
                "    {:<24} {:>3} pts  {:>2} reb  {:>2} ast  {:>5.1} fg%",
                line.player_name,
                line.derived.points,
                line.derived.rebounds,
                line.assists,
                line.derived.field_goal_pct,
            );
        }
        println!();
    }

    for player in database.players() {
        let averages = database.player_averages(player.id)?;
        println!(
            "{:<24} {:>5.1} ppg  {:>4.1} rpg  {:>4.1} apg",
            player.name,
            averages.points_per_game,
            averages.rebounds_per_game,
            averages.assists_per_game,
        );
    }

    Ok(())
}
