//! # Tables
//!
//! A [`Table`] is the in-memory home of one kind of [`Record`]. Besides the rows it keeps
//! an id sequence and an undo journal, which is what lets the actor discard a whole
//! transaction after a failure.
//!
//! Every mutating method records the row's previous value before touching it. `commit()`
//! forgets the journal, `rollback()` replays it backwards.

use crate::error::StoreError;
use crate::record::Record;
use std::collections::HashMap;

/// Previous state of a row, captured before a write. `None` means the row did not exist.
struct Undo<T: Record> {
    id: T::Id,
    before: Option<T>,
}

/// Rows of a single record type plus the bookkeeping needed for atomic transactions.
pub struct Table<T: Record> {
    rows: HashMap<T::Id, T>,
    next_id: u32,
    journal: Vec<Undo<T>>,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
            journal: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.rows.get(id)
    }

    /// Iterates over all rows in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Iterates over the rows matching `predicate`.
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a T>
    where
        P: FnMut(&T) -> bool + 'a,
    {
        self.rows.values().filter(move |row| predicate(row))
    }

    /// Inserts a new row built from `draft` and returns a copy of it.
    ///
    /// # Errors
    /// [`StoreError::UniqueViolation`] if another row already holds the same unique key.
    /// The id sequence still advances in that case; ids are never reused.
    pub fn insert(&mut self, draft: T::Draft) -> Result<T, StoreError> {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let row = T::from_draft(id.clone(), draft);
        if let Some(key) = row.unique_key() {
            if self.key_taken(&key, None) {
                return Err(StoreError::UniqueViolation {
                    table: T::TABLE,
                    key,
                });
            }
        }

        self.journal.push(Undo {
            id: id.clone(),
            before: None,
        });
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    /// Applies `f` to an existing row.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if no row has this id.
    /// - [`StoreError::UniqueViolation`] if the change makes the row collide with another
    ///   row's unique key. The row is left untouched.
    pub fn update<R>(&mut self, id: &T::Id, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        match self.update_where(id, |_| true, f)? {
            Some(result) => Ok(result),
            None => Err(not_found::<T>(id)),
        }
    }

    /// Conditional write: applies `f` only if `condition` holds for the current row.
    ///
    /// Returns `Ok(None)` when the condition is false (the "zero rows" outcome).
    ///
    /// # Errors
    /// Same as [`Table::update`].
    pub fn update_where<R>(
        &mut self,
        id: &T::Id,
        condition: impl FnOnce(&T) -> bool,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<Option<R>, StoreError> {
        let Some(row) = self.rows.get_mut(id) else {
            return Err(not_found::<T>(id));
        };
        if !condition(row) {
            return Ok(None);
        }

        // Journal first: `f` may panic halfway through the row.
        self.journal.push(Undo {
            id: id.clone(),
            before: Some(row.clone()),
        });
        let result = f(row);

        if let Some(key) = row.unique_key() {
            if self.key_taken(&key, Some(id)) {
                if let Some(Undo {
                    before: Some(before),
                    ..
                }) = self.journal.pop()
                {
                    self.rows.insert(id.clone(), before);
                }
                return Err(StoreError::UniqueViolation {
                    table: T::TABLE,
                    key,
                });
            }
        }

        Ok(Some(result))
    }

    /// Removes a row and returns it.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if no row has this id.
    pub fn remove(&mut self, id: &T::Id) -> Result<T, StoreError> {
        let Some(row) = self.rows.remove(id) else {
            return Err(not_found::<T>(id));
        };
        self.journal.push(Undo {
            id: id.clone(),
            before: Some(row.clone()),
        });
        Ok(row)
    }

    /// Makes every write since the last commit permanent.
    pub fn commit(&mut self) {
        self.journal.clear();
    }

    /// Discards every write since the last commit.
    pub fn rollback(&mut self) {
        while let Some(undo) = self.journal.pop() {
            match undo.before {
                Some(row) => {
                    self.rows.insert(undo.id, row);
                }
                None => {
                    self.rows.remove(&undo.id);
                }
            }
        }
    }

    /// Number of writes not yet committed.
    pub fn pending_writes(&self) -> usize {
        self.journal.len()
    }

    fn key_taken(&self, key: &str, except: Option<&T::Id>) -> bool {
        self.rows
            .values()
            .filter(|row| except != Some(row.id()))
            .any(|row| row.unique_key().as_deref() == Some(key))
    }
}

fn not_found<T: Record>(id: &T::Id) -> StoreError {
    StoreError::NotFound {
        table: T::TABLE,
        id: id.to_string(),
    }
}
