use crate::database::Repository;
use crate::error::Error;
use crate::game::AwayHome;
use crate::id::{GameId, PlayerId, TeamId};
use crate::statline::ShotLine;
use crate::stats::{team_score, StatlineDerived};
use serde::Serialize;

/// One team's side of the final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TeamScore {
    pub team: TeamId,
    pub abbreviation: String,
    pub points: u32,
}

/// One player's row: the recorded counts plus the computed columns.
#[derive(Clone, Debug, Serialize)]
pub struct BoxScoreLine {
    pub player: PlayerId,
    pub player_name: String,
    pub team: Option<TeamId>,
    pub field_goals: ShotLine,
    pub three_pointers: ShotLine,
    pub free_throws: ShotLine,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub derived: StatlineDerived,
}

/// The full account of one game, ready for rendering. Contains no links and
/// no layout, just values.
#[derive(Clone, Debug, Serialize)]
pub struct BoxScore {
    pub game: GameId,
    pub info: String,
    pub scores: AwayHome<TeamScore>,
    pub lines: Vec<BoxScoreLine>,
}

/// Assembles the view of one game from the store and the statistics engine.
pub fn box_score(repo: &impl Repository, game: GameId) -> Result<BoxScore, Error> {
    let record = repo.require_game(game)?;

    let scores = record.teams.map(|team| TeamScore {
        team,
        abbreviation: repo
            .team(team)
            .map_or_else(|| team.to_string(), |t| t.abbreviation.clone()),
        points: team_score(repo, team, game),
    });

    let mut lines: Vec<BoxScoreLine> = repo
        .statlines_for_game(game)
        .into_iter()
        .map(|line| {
            let player = repo.player(line.player);
            BoxScoreLine {
                player: line.player,
                player_name: player.map_or_else(String::new, |p| p.name.clone()),
                team: player.and_then(|p| p.team),
                field_goals: line.field_goals,
                three_pointers: line.three_pointers,
                free_throws: line.free_throws,
                offensive_rebounds: line.offensive_rebounds,
                defensive_rebounds: line.defensive_rebounds,
                assists: line.assists,
                steals: line.steals,
                blocks: line.blocks,
                turnovers: line.turnovers,
                derived: line.derived(),
            }
        })
        .collect();
    lines.sort_by_key(|line| line.player);

    Ok(BoxScore {
        game,
        info: record.summary(repo),
        scores,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::box_score;
    use crate::database::fixtures::{butler_game_one, curry_game_one, seed};
    use crate::error::Error;
    use crate::id::GameId;

    #[test]
    fn unknown_game_is_a_reference_error() {
        let seed = seed();
        let stray = GameId::new();
        assert!(matches!(
            box_score(&seed.db, stray),
            Err(Error::NotFound { kind: "game", .. })
        ));
    }

    #[test]
    fn assembles_scores_and_player_lines() {
        let mut seed = seed();
        seed.db.create_statline(butler_game_one(&seed)).unwrap();
        seed.db.create_statline(curry_game_one(&seed)).unwrap();

        let score = box_score(&seed.db, seed.game).unwrap();
        assert_eq!(score.info, "GSW @ MIA - 2024-01-01 00:00:00 UTC");
        assert_eq!(score.scores.home.abbreviation, "MIA");
        assert_eq!(score.scores.home.points, 11);
        assert_eq!(score.scores.away.abbreviation, "GSW");
        assert_eq!(score.scores.away.points, 32);

        assert_eq!(score.lines.len(), 2);
        let butler = score
            .lines
            .iter()
            .find(|line| line.player == seed.butler)
            .unwrap();
        assert_eq!(butler.player_name, "Jimmy Butler");
        assert_eq!(butler.team, Some(seed.mia));
        assert_eq!(butler.derived.points, 11);
        assert_eq!(butler.derived.rebounds, 13);
        assert_eq!(butler.derived.field_goal_pct, 37.5);
        assert_eq!(butler.derived.three_point_pct, 25.0);
        assert_eq!(butler.derived.free_throw_pct, 100.0);
    }

    #[test]
    fn a_game_without_statlines_is_a_zero_zero_box() {
        let seed = seed();
        let score = box_score(&seed.db, seed.game).unwrap();
        assert_eq!(score.scores.home.points, 0);
        assert_eq!(score.scores.away.points, 0);
        assert!(score.lines.is_empty());
    }
}
