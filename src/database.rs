use crate::error::Error;
use crate::game::AwayHome;
use crate::id::{CoachId, GameId, PlayerId, StatlineId, TeamId};
use crate::stats::{self, PlayerAverages};
use crate::{
    Coach, CoachDraft, Game, GameDraft, Player, PlayerDraft, Statline, StatlineDraft, Team,
    TeamDraft,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The narrow query contracts the consistency rules and the statistics
/// engine depend on. Any storage backend can sit behind this.
///
/// The rules run read-then-decide sequences against these queries before a
/// write; a backend shared by concurrent writers must evaluate the check and
/// the subsequent insert under serializable isolation (or back the uniqueness
/// and overlap rules with constraints), or two simultaneous submissions can
/// both pass validation.
pub trait Repository {
    fn team(&self, id: TeamId) -> Option<&Team>;
    fn coach(&self, id: CoachId) -> Option<&Coach>;
    fn player(&self, id: PlayerId) -> Option<&Player>;
    fn game(&self, id: GameId) -> Option<&Game>;
    fn statline(&self, id: StatlineId) -> Option<&Statline>;

    fn team_with_abbreviation(&self, abbreviation: &str) -> Option<&Team>;
    fn team_with_full_name(&self, full_name: &str) -> Option<&Team>;
    fn coach_of(&self, team: TeamId) -> Option<&Coach>;
    fn player_with_jersey(&self, team: TeamId, jersey_number: u8) -> Option<&Player>;

    /// Games between the same two sides (either orientation) at that exact
    /// tip-off.
    fn games_between(&self, teams: &AwayHome<TeamId>, date: DateTime<Utc>) -> Vec<&Game>;
    /// Games involving `team` in either role with a tip-off inside
    /// `date ± window`, bounds included.
    fn games_for_team_within(
        &self,
        team: TeamId,
        date: DateTime<Utc>,
        window: Duration,
    ) -> Vec<&Game>;

    fn statline_for(&self, game: GameId, player: PlayerId) -> Option<&Statline>;
    fn statlines_for_game(&self, game: GameId) -> Vec<&Statline>;
    fn statlines_for_player(&self, player: PlayerId) -> Vec<&Statline>;

    fn require_team(&self, id: TeamId) -> Result<&Team, Error> {
        self.team(id).ok_or(Error::NotFound { kind: "team", id: id.0 })
    }

    fn require_coach(&self, id: CoachId) -> Result<&Coach, Error> {
        self.coach(id).ok_or(Error::NotFound { kind: "coach", id: id.0 })
    }

    fn require_player(&self, id: PlayerId) -> Result<&Player, Error> {
        self.player(id).ok_or(Error::NotFound { kind: "player", id: id.0 })
    }

    fn require_game(&self, id: GameId) -> Result<&Game, Error> {
        self.game(id).ok_or(Error::NotFound { kind: "game", id: id.0 })
    }

    fn require_statline(&self, id: StatlineId) -> Result<&Statline, Error> {
        self.statline(id)
            .ok_or(Error::NotFound { kind: "statline", id: id.0 })
    }
}

/// The in-memory reference store. Writes validate first and persist second,
/// within one `&mut self` call, so the read-then-decide sequences in the
/// rules cannot interleave.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Database {
    pub(crate) teams: BTreeMap<TeamId, Team>,
    pub(crate) coaches: BTreeMap<CoachId, Coach>,
    pub(crate) players: BTreeMap<PlayerId, Player>,
    pub(crate) games: BTreeMap<GameId, Game>,
    pub(crate) statlines: BTreeMap<StatlineId, Statline>,
}

impl Repository for Database {
    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    fn coach(&self, id: CoachId) -> Option<&Coach> {
        self.coaches.get(&id)
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    fn game(&self, id: GameId) -> Option<&Game> {
        self.games.get(&id)
    }

    fn statline(&self, id: StatlineId) -> Option<&Statline> {
        self.statlines.get(&id)
    }

    fn team_with_abbreviation(&self, abbreviation: &str) -> Option<&Team> {
        self.teams
            .values()
            .find(|team| team.abbreviation == abbreviation)
    }

    fn team_with_full_name(&self, full_name: &str) -> Option<&Team> {
        self.teams.values().find(|team| team.full_name == full_name)
    }

    fn coach_of(&self, team: TeamId) -> Option<&Coach> {
        self.coaches.values().find(|coach| coach.team == Some(team))
    }

    fn player_with_jersey(&self, team: TeamId, jersey_number: u8) -> Option<&Player> {
        self.players
            .values()
            .find(|player| player.team == Some(team) && player.jersey_number == jersey_number)
    }

    fn games_between(&self, teams: &AwayHome<TeamId>, date: DateTime<Utc>) -> Vec<&Game> {
        self.games
            .values()
            .filter(|game| game.date == date && game.teams.same_pairing(teams))
            .collect()
    }

    fn games_for_team_within(
        &self,
        team: TeamId,
        date: DateTime<Utc>,
        window: Duration,
    ) -> Vec<&Game> {
        self.games
            .values()
            .filter(|game| {
                game.teams.contains(&team)
                    && game.date >= date - window
                    && game.date <= date + window
            })
            .collect()
    }

    fn statline_for(&self, game: GameId, player: PlayerId) -> Option<&Statline> {
        self.statlines
            .values()
            .find(|line| line.game == game && line.player == player)
    }

    fn statlines_for_game(&self, game: GameId) -> Vec<&Statline> {
        self.statlines
            .values()
            .filter(|line| line.game == game)
            .collect()
    }

    fn statlines_for_player(&self, player: PlayerId) -> Vec<&Statline> {
        self.statlines
            .values()
            .filter(|line| line.player == player)
            .collect()
    }
}

impl Database {
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn create_team(&mut self, draft: TeamDraft) -> Result<TeamId, Error> {
        draft.validate(self, None)?;
        let id = TeamId::new();
        self.teams.insert(id, draft.into_team(id));
        Ok(id)
    }

    pub fn update_team(&mut self, id: TeamId, draft: TeamDraft) -> Result<(), Error> {
        self.require_team(id)?;
        draft.validate(self, Some(id))?;
        self.teams.insert(id, draft.into_team(id));
        Ok(())
    }

    /// Removing a team takes its games (and their statlines) with it;
    /// coaches and players merely lose the reference.
    pub fn remove_team(&mut self, id: TeamId) -> Result<(), Error> {
        if self.teams.remove(&id).is_none() {
            return Err(Error::NotFound { kind: "team", id: id.0 });
        }
        let doomed: Vec<GameId> = self
            .games
            .values()
            .filter(|game| game.teams.contains(&id))
            .map(|game| game.id)
            .collect();
        for game in doomed {
            self.statlines.retain(|_, line| line.game != game);
            self.games.remove(&game);
        }
        for coach in self.coaches.values_mut() {
            if coach.team == Some(id) {
                coach.team = None;
            }
        }
        for player in self.players.values_mut() {
            if player.team == Some(id) {
                player.team = None;
            }
        }
        Ok(())
    }

    pub fn create_coach(&mut self, draft: CoachDraft, today: NaiveDate) -> Result<CoachId, Error> {
        draft.validate(self, None, today)?;
        let id = CoachId::new();
        self.coaches.insert(id, draft.into_coach(id));
        Ok(id)
    }

    pub fn update_coach(
        &mut self,
        id: CoachId,
        draft: CoachDraft,
        today: NaiveDate,
    ) -> Result<(), Error> {
        self.require_coach(id)?;
        draft.validate(self, Some(id), today)?;
        self.coaches.insert(id, draft.into_coach(id));
        Ok(())
    }

    pub fn remove_coach(&mut self, id: CoachId) -> Result<(), Error> {
        match self.coaches.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound { kind: "coach", id: id.0 }),
        }
    }

    pub fn create_player(
        &mut self,
        draft: PlayerDraft,
        today: NaiveDate,
    ) -> Result<PlayerId, Error> {
        draft.validate(self, None, today)?;
        let id = PlayerId::new();
        self.players.insert(id, draft.into_player(id));
        Ok(id)
    }

    pub fn update_player(
        &mut self,
        id: PlayerId,
        draft: PlayerDraft,
        today: NaiveDate,
    ) -> Result<(), Error> {
        self.require_player(id)?;
        draft.validate(self, Some(id), today)?;
        self.players.insert(id, draft.into_player(id));
        Ok(())
    }

    /// A player's statlines are theirs alone and leave with them.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), Error> {
        if self.players.remove(&id).is_none() {
            return Err(Error::NotFound { kind: "player", id: id.0 });
        }
        self.statlines.retain(|_, line| line.player != id);
        Ok(())
    }

    pub fn create_game(&mut self, draft: GameDraft) -> Result<GameId, Error> {
        draft.validate(self, None)?;
        let id = GameId::new();
        self.games.insert(id, draft.into_game(id));
        Ok(id)
    }

    pub fn update_game(&mut self, id: GameId, draft: GameDraft) -> Result<(), Error> {
        self.require_game(id)?;
        draft.validate(self, Some(id))?;
        self.games.insert(id, draft.into_game(id));
        Ok(())
    }

    pub fn remove_game(&mut self, id: GameId) -> Result<(), Error> {
        if self.games.remove(&id).is_none() {
            return Err(Error::NotFound { kind: "game", id: id.0 });
        }
        self.statlines.retain(|_, line| line.game != id);
        Ok(())
    }

    pub fn create_statline(&mut self, draft: StatlineDraft) -> Result<StatlineId, Error> {
        draft.validate(self, None)?;
        let id = StatlineId::new();
        self.statlines.insert(id, draft.into_statline(id));
        Ok(id)
    }

    pub fn update_statline(&mut self, id: StatlineId, draft: StatlineDraft) -> Result<(), Error> {
        self.require_statline(id)?;
        draft.validate(self, Some(id))?;
        self.statlines.insert(id, draft.into_statline(id));
        Ok(())
    }

    pub fn remove_statline(&mut self, id: StatlineId) -> Result<(), Error> {
        match self.statlines.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound { kind: "statline", id: id.0 }),
        }
    }

    /// Season averages for one player, over every statline on record.
    pub fn player_averages(&self, player: PlayerId) -> Result<PlayerAverages, Error> {
        self.require_player(player)?;
        Ok(stats::player_averages(self.statlines_for_player(player)))
    }

    // Plain maps can drift out of sync with each other in ways a relational
    // store would forbid. These invariants are what the write operations
    // preserve; the check runs when a snapshot is deserialized into a
    // `League`, so hand-edited or truncated files are caught at the door.
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        macro_rules! nil_check {
            ($iter:expr) => {
                for obj in $iter {
                    if obj.id.0.is_nil() {
                        problems.push(format!("- nil uuid: {:?}", obj))
                    }
                }
            };
        }
        nil_check!(self.teams.values());
        nil_check!(self.coaches.values());
        nil_check!(self.players.values());
        nil_check!(self.games.values());
        nil_check!(self.statlines.values());

        macro_rules! key_check {
            ($iter:expr, $kind:expr) => {
                for (key, obj) in $iter {
                    if obj.id != *key {
                        problems.push(format!("- {} {} is keyed with {}", $kind, obj.id, key));
                    }
                }
            };
        }
        key_check!(&self.teams, "team");
        key_check!(&self.coaches, "coach");
        key_check!(&self.players, "player");
        key_check!(&self.games, "game");
        key_check!(&self.statlines, "statline");

        for coach in self.coaches.values() {
            if let Some(team) = coach.team {
                if !self.teams.contains_key(&team) {
                    problems.push(format!("- coach {} references missing team {}", coach.id, team));
                }
            }
        }
        for player in self.players.values() {
            if let Some(team) = player.team {
                if !self.teams.contains_key(&team) {
                    problems.push(format!(
                        "- player {} references missing team {}",
                        player.id, team
                    ));
                }
            }
        }
        for game in self.games.values() {
            for team in [game.teams.away, game.teams.home] {
                if !self.teams.contains_key(&team) {
                    problems.push(format!("- game {} references missing team {}", game.id, team));
                }
            }
        }
        for line in self.statlines.values() {
            if !self.games.contains_key(&line.game) {
                problems.push(format!(
                    "- statline {} references missing game {}",
                    line.id, line.game
                ));
            }
            if !self.players.contains_key(&line.player) {
                problems.push(format!(
                    "- statline {} references missing player {}",
                    line.id, line.player
                ));
            }
        }

        let mut pairs = BTreeSet::new();
        for line in self.statlines.values() {
            if !pairs.insert((line.game, line.player)) {
                problems.push(format!(
                    "- duplicate statline for player {} in game {}",
                    line.player, line.game
                ));
            }
        }
        let mut coached = BTreeSet::new();
        for coach in self.coaches.values() {
            if let Some(team) = coach.team {
                if !coached.insert(team) {
                    problems.push(format!("- team {} has more than one coach", team));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("\n"))
        }
    }
}
