//! # Quests
//!
//! Quest records and the history that owns them.
//!
//! The history is the single canonical copy of every quest the player has been
//! given. The player only holds a [`QuestId`] into it, so progress made during
//! a battle is what gets saved.

use serde::{Deserialize, Serialize};

/// A quest handed out by an NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub progress: u32,
    /// Progress needed to complete the quest
    pub required: u32,
    pub completed: bool,
    /// Opaque reward label, e.g. "Gold"
    pub reward: String,
}

impl Quest {
    /// Creates a fresh, unstarted quest. `required` is raised to at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use eldoria::Quest;
    ///
    /// let quest = Quest::new("Find the Lost Artifact", 1, "Gold");
    /// assert_eq!(quest.progress, 0);
    /// assert!(!quest.completed);
    /// ```
    pub fn new(name: impl Into<String>, required: u32, reward: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progress: 0,
            required: required.max(1),
            completed: false,
            reward: reward.into(),
        }
    }

    /// Whether enough progress has been made to complete the quest.
    pub fn is_satisfied(&self) -> bool {
        self.progress >= self.required
    }

    /// Marks the quest completed if its progress allows it.
    ///
    /// Returns true only on the call that flips it to completed.
    pub fn try_complete(&mut self) -> bool {
        if self.completed || !self.is_satisfied() {
            return false;
        }
        self.completed = true;
        true
    }
}

/// Handle to a quest stored in a [`QuestHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestId(pub usize);

/// Ordered record of every quest the player has received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestHistory {
    quests: Vec<Quest>,
}

impl QuestHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from previously saved quests.
    pub fn from_quests(quests: Vec<Quest>) -> Self {
        Self { quests }
    }

    /// Adds a quest and returns its handle.
    pub fn register(&mut self, quest: Quest) -> QuestId {
        self.quests.push(quest);
        QuestId(self.quests.len() - 1)
    }

    /// Finds a quest by name, returning the first match.
    pub fn find_by_name(&self, name: &str) -> Option<QuestId> {
        self.quests.iter().position(|q| q.name == name).map(QuestId)
    }

    pub fn get(&self, id: QuestId) -> Option<&Quest> {
        self.quests.get(id.0)
    }

    pub fn get_mut(&mut self, id: QuestId) -> Option<&mut Quest> {
        self.quests.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Returns the quests in insertion order.
    pub fn as_slice(&self) -> &[Quest] {
        &self.quests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_is_at_least_one() {
        let quest = Quest::new("Nothing", 0, "Nothing");
        assert_eq!(quest.required, 1);
    }

    #[test]
    fn test_try_complete_is_idempotent() {
        let mut quest = Quest::new("Hunt", 2, "Gold");
        assert!(!quest.try_complete());

        quest.progress = 2;
        assert!(quest.try_complete());
        assert!(quest.completed);
        assert!(!quest.try_complete());
    }

    #[test]
    fn test_history_lookup() {
        let mut history = QuestHistory::new();
        assert!(history.is_empty());

        let first = history.register(Quest::new("First", 1, "Gold"));
        let second = history.register(Quest::new("Second", 3, "Bow"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.find_by_name("Second"), Some(second));
        assert_eq!(history.find_by_name("Third"), None);

        history.get_mut(first).unwrap().progress = 1;
        assert_eq!(history.get(first).unwrap().progress, 1);
        assert_eq!(history.get(QuestId(9)), None);
    }
}
