use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::{QueryResult, SqliteConnection};

use super::Id;

pub trait Actions: Sized + Send + 'static {
    /// Used when a lookup comes back empty, e. g. "venue 42".
    const KIND: &'static str;

    fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<(Id<Self>, Self)>>;
    fn create(conn: &mut SqliteConnection, item: Self) -> QueryResult<Id<Self>>;
    fn read(conn: &mut SqliteConnection, id: Id<Self>) -> QueryResult<Self>;
    fn update(conn: &mut SqliteConnection, id: Id<Self>, new_item: Self) -> QueryResult<Self>;
}

/// Entities with a searchable name that host shows.
pub trait Listing: Actions {
    /// Ids and names containing `term`, ordered by id.
    fn search(conn: &mut SqliteConnection, term: &str) -> QueryResult<Vec<(Id<Self>, String)>>;
    fn upcoming_show_counts(
        conn: &mut SqliteConnection,
        now: NaiveDateTime,
    ) -> QueryResult<HashMap<i32, i64>>;
}

/// Case-insensitive substring match. Case folding covers all of Unicode,
/// which SQLite's `LIKE` does not.
pub fn name_matches(name: &str, lowercase_term: &str) -> bool {
    name.to_lowercase().contains(lowercase_term)
}

macro_rules! derive_actions {
    ($t: ident, $s: ident, $new: ident, $table: ident, $kind: expr) => {
        impl Actions for $t {
            const KIND: &'static str = $kind;

            fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<(Id<$t>, $t)>> {
                $table::table
                    .order_by($table::id)
                    .load::<$s>(conn)
                    .map(|rows| rows.into_iter().map(<(Id<$t>, $t)>::from).collect())
            }

            fn create(conn: &mut SqliteConnection, item: $t) -> QueryResult<Id<$t>> {
                let sql_item: $new = item.into();
                diesel::insert_into($table::table)
                    .values(&sql_item)
                    .returning($table::id)
                    .get_result::<i32>(conn)
                    .map(Id::from)
            }

            fn read(conn: &mut SqliteConnection, item_id: Id<$t>) -> QueryResult<$t> {
                $table::table
                    .find(item_id.raw())
                    .first::<$s>(conn)
                    .map(|row| {
                        let (_, item): (Id<$t>, $t) = row.into();
                        item
                    })
            }

            fn update(
                conn: &mut SqliteConnection,
                item_id: Id<$t>,
                new_item: $t,
            ) -> QueryResult<$t> {
                let previous = Self::read(conn, item_id)?;

                diesel::update($table::table.find(item_id.raw()))
                    .set::<$new>(new_item.into())
                    .execute(conn)?;

                Ok(previous)
            }
        }
    };
}

macro_rules! derive_listing {
    ($t: ident, $table: ident, $show_key: ident) => {
        impl Listing for $t {
            fn search(
                conn: &mut SqliteConnection,
                term: &str,
            ) -> QueryResult<Vec<(Id<$t>, String)>> {
                let term = term.to_lowercase();
                $table::table
                    .order_by($table::id)
                    .select(($table::id, $table::name))
                    .load::<(i32, String)>(conn)
                    .map(|rows| {
                        rows.into_iter()
                            .filter(|(_, name)| $crate::store::action::name_matches(name, &term))
                            .map(|(id, name)| (Id::from(id), name))
                            .collect()
                    })
            }

            fn upcoming_show_counts(
                conn: &mut SqliteConnection,
                now: NaiveDateTime,
            ) -> QueryResult<HashMap<i32, i64>> {
                shows::table
                    .filter(shows::start_time.ge(now))
                    .group_by(shows::$show_key)
                    .select((shows::$show_key, diesel::dsl::count_star()))
                    .load::<(i32, i64)>(conn)
                    .map(|rows| rows.into_iter().collect())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::name_matches;

    #[test]
    fn matches_substrings_in_any_case() {
        assert!(name_matches("The Musical Hop", "hop"));
        assert!(name_matches("The Musical Hop", "musical h"));
        assert!(!name_matches("The Musical Hop", "jazz"));
    }

    #[test]
    fn folds_non_ascii_letters() {
        assert!(name_matches("Café Ébène", &"CAFÉ".to_lowercase()));
        assert!(name_matches("CAFÉ ÉBÈNE", "ébène"));
    }

    #[test]
    fn wildcards_are_plain_characters() {
        assert!(!name_matches("The Musical Hop", "%"));
        assert!(name_matches("100% Jazz", "100%"));
    }
}
