//! Derived figures over statlines. Everything here is a pure function of its
//! inputs: no store writes, no caching, calling twice gives the same answer.

use crate::database::Repository;
use crate::id::{GameId, TeamId};
use crate::statline::{ShotLine, Statline};
use serde::Serialize;

// Two decimal places, halves away from zero: 55.555 rounds to 55.56.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The computed columns for a single statline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatlineDerived {
    pub points: u32,
    pub rebounds: u32,
    pub field_goal_pct: f64,
    pub three_point_pct: f64,
    pub free_throw_pct: f64,
}

impl Statline {
    pub fn derived(&self) -> StatlineDerived {
        StatlineDerived {
            points: self.points(),
            rebounds: self.rebounds(),
            field_goal_pct: self.field_goals.percentage(),
            three_point_pct: self.three_pointers.percentage(),
            free_throw_pct: self.free_throws.percentage(),
        }
    }
}

/// Season figures for one player. Rate stats divide season totals by games
/// played; the shooting percentages are computed from summed made and
/// attempted counts, not by averaging per-game percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PlayerAverages {
    pub points_per_game: f64,
    pub offensive_rebounds_per_game: f64,
    pub defensive_rebounds_per_game: f64,
    pub rebounds_per_game: f64,
    pub assists_per_game: f64,
    pub steals_per_game: f64,
    pub blocks_per_game: f64,
    pub turnovers_per_game: f64,
    pub field_goal_pct: f64,
    pub three_point_pct: f64,
    pub free_throw_pct: f64,
}

pub fn player_averages<'a, I>(statlines: I) -> PlayerAverages
where
    I: IntoIterator<Item = &'a Statline>,
{
    let mut games: u32 = 0;
    let mut points: u32 = 0;
    let mut offensive_rebounds: u32 = 0;
    let mut defensive_rebounds: u32 = 0;
    let mut assists: u32 = 0;
    let mut steals: u32 = 0;
    let mut blocks: u32 = 0;
    let mut turnovers: u32 = 0;
    let mut field_goals = ShotLine::default();
    let mut three_pointers = ShotLine::default();
    let mut free_throws = ShotLine::default();

    for line in statlines {
        games += 1;
        points += line.points();
        offensive_rebounds += line.offensive_rebounds;
        defensive_rebounds += line.defensive_rebounds;
        assists += line.assists;
        steals += line.steals;
        blocks += line.blocks;
        turnovers += line.turnovers;
        field_goals.made += line.field_goals.made;
        field_goals.attempted += line.field_goals.attempted;
        three_pointers.made += line.three_pointers.made;
        three_pointers.attempted += line.three_pointers.attempted;
        free_throws.made += line.free_throws.made;
        free_throws.attempted += line.free_throws.attempted;
    }

    if games == 0 {
        return PlayerAverages::default();
    }

    let per_game = |total: u32| round2(f64::from(total) / f64::from(games));
    PlayerAverages {
        points_per_game: per_game(points),
        offensive_rebounds_per_game: per_game(offensive_rebounds),
        defensive_rebounds_per_game: per_game(defensive_rebounds),
        rebounds_per_game: per_game(offensive_rebounds + defensive_rebounds),
        assists_per_game: per_game(assists),
        steals_per_game: per_game(steals),
        blocks_per_game: per_game(blocks),
        turnovers_per_game: per_game(turnovers),
        field_goal_pct: field_goals.percentage(),
        three_point_pct: three_pointers.percentage(),
        free_throw_pct: free_throws.percentage(),
    }
}

/// Points scored in one game by the players of one team.
pub fn team_score(repo: &impl Repository, team: TeamId, game: GameId) -> u32 {
    repo.statlines_for_game(game)
        .into_iter()
        .filter(|line| {
            repo.player(line.player)
                .is_some_and(|player| player.team == Some(team))
        })
        .map(Statline::points)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{player_averages, round2, team_score, PlayerAverages};
    use crate::database::fixtures::{butler_game_one, butler_game_two, seed};
    use crate::statline::{ShotLine, Statline};

    fn line(ftm: u32, fgm: u32, tpm: u32) -> Statline {
        Statline {
            free_throws: ShotLine { made: ftm, attempted: ftm },
            field_goals: ShotLine { made: fgm, attempted: fgm },
            three_pointers: ShotLine { made: tpm, attempted: tpm },
            ..Statline::default()
        }
    }

    #[test]
    fn points_decompose_made_shots() {
        // 4 free throws, 2 two-pointers, 1 three-pointer.
        assert_eq!(line(4, 3, 1).points(), 11);
        // 12 free throws, 4 two-pointers, 4 three-pointers.
        assert_eq!(line(12, 8, 4).points(), 32);
        assert_eq!(line(0, 0, 0).points(), 0);
    }

    #[test]
    fn percentages_guard_against_empty_categories() {
        assert_eq!(ShotLine { made: 0, attempted: 0 }.percentage(), 0.0);
        assert_eq!(ShotLine { made: 3, attempted: 6 }.percentage(), 50.0);
        assert_eq!(ShotLine { made: 1, attempted: 4 }.percentage(), 25.0);
        assert_eq!(ShotLine { made: 4, attempted: 4 }.percentage(), 100.0);
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        assert_eq!(ShotLine { made: 5, attempted: 9 }.percentage(), 55.56);
        assert_eq!(ShotLine { made: 3, attempted: 8 }.percentage(), 37.5);
        assert_eq!(ShotLine { made: 11, attempted: 18 }.percentage(), 61.11);
        assert_eq!(ShotLine { made: 16, attempted: 17 }.percentage(), 94.12);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn averages_of_nothing_are_zero() {
        let none: [&Statline; 0] = [];
        assert_eq!(player_averages(none), PlayerAverages::default());
        assert_eq!(player_averages(none).points_per_game, 0.0);
    }

    #[test]
    fn averages_divide_totals_by_games_played() {
        let seed = seed();
        let first = butler_game_one(&seed).into_statline(crate::id::StatlineId::new());
        let second = butler_game_two(&seed).into_statline(crate::id::StatlineId::new());
        let averages = player_averages([&first, &second]);

        assert_eq!(averages.points_per_game, 21.5);
        assert_eq!(averages.offensive_rebounds_per_game, 3.0);
        assert_eq!(averages.defensive_rebounds_per_game, 5.0);
        assert_eq!(averages.rebounds_per_game, 8.0);
        assert_eq!(averages.assists_per_game, 3.5);
        assert_eq!(averages.steals_per_game, 1.0);
        assert_eq!(averages.blocks_per_game, 2.0);
        assert_eq!(averages.turnovers_per_game, 0.5);
        // Totals, not averaged per-game percentages: 11 of 20 across both
        // games, even though the per-game rates are 37.5 and 66.67.
        assert_eq!(averages.field_goal_pct, 55.0);
        assert_eq!(averages.three_point_pct, 62.5);
        assert_eq!(averages.free_throw_pct, 94.12);
    }

    #[test]
    fn team_scores_sum_only_that_teams_statlines() {
        let mut seed = seed();
        seed.db.create_statline(butler_game_one(&seed)).unwrap();
        seed.db.create_statline(crate::database::fixtures::curry_game_one(&seed)).unwrap();

        assert_eq!(team_score(&seed.db, seed.mia, seed.game), 11);
        assert_eq!(team_score(&seed.db, seed.gsw, seed.game), 32);
        assert_eq!(team_score(&seed.db, seed.ind, seed.game), 0);
    }

    #[test]
    fn derived_stats_are_idempotent() {
        let seed = seed();
        let statline = butler_game_one(&seed).into_statline(crate::id::StatlineId::new());
        assert_eq!(statline.derived(), statline.derived());
        assert_eq!(statline.derived().points, 11);
        assert_eq!(statline.derived().rebounds, 13);
        assert_eq!(statline.derived().field_goal_pct, 37.5);
    }
}
