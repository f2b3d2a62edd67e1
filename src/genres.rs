use serde::{Deserialize, Deserializer, Serializer};

/// Genre names in the order of the flag columns of `u.item`.
pub const GENRE_NAMES: [&str; 18] = [
    "Action",
    "Adventure",
    "Animation",
    "Children",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Fantasy",
    "Film-Noir",
    "Sci-Fi",
    "Musical",
    "Mystery",
    "Romance",
    "Horror",
    "Thriller",
    "War",
    "Western",
];

/// Index of the first genre flag column in a raw record.
pub const GENRE_FLAG_OFFSET: usize = 5;

/// Records with fewer fields than this cannot hold the full flag window.
pub const MIN_FIELDS: usize = GENRE_FLAG_OFFSET + GENRE_NAMES.len();

pub const UNKNOWN_GENRE: &str = "Unknown";

/// Separator between genre names inside the single CSV `genres` field.
pub const GENRE_SEPARATOR: &str = "|";

/// Maps a flag window to genre names. A flag counts only when it is exactly `"1"`.
pub fn genres_from_flags<'a, I>(flags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut genres: Vec<String> = flags
        .into_iter()
        .zip(GENRE_NAMES.iter())
        .filter(|(flag, _)| *flag == "1")
        .map(|(_, name)| (*name).to_owned())
        .collect();

    if genres.is_empty() {
        genres.push(UNKNOWN_GENRE.to_owned());
    }

    genres
}

pub fn join_genres(genres: &[String]) -> String {
    genres.join(GENRE_SEPARATOR)
}

pub fn serialize_genres<S>(genres: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&join_genres(genres))
}

pub fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    Ok(s.split(GENRE_SEPARATOR).map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(set: &[usize]) -> Vec<&'static str> {
        (0..GENRE_NAMES.len())
            .map(|i| if set.contains(&i) { "1" } else { "0" })
            .collect()
    }

    #[test]
    fn flag_window_matches_source_layout() {
        assert_eq!(GENRE_NAMES.len(), 18);
        assert_eq!(MIN_FIELDS, 23);
    }

    #[test]
    fn set_flags_map_in_table_order() {
        let genres = genres_from_flags(window(&[2, 3, 4]));
        assert_eq!(genres, vec!["Animation", "Children", "Comedy"]);
    }

    #[test]
    fn first_and_last_columns() {
        let genres = genres_from_flags(window(&[0, 17]));
        assert_eq!(genres, vec!["Action", "Western"]);
    }

    #[test]
    fn no_flags_set_is_unknown() {
        assert_eq!(genres_from_flags(window(&[])), vec![UNKNOWN_GENRE]);
    }

    #[test]
    fn only_exact_one_counts() {
        let mut flags = window(&[]);
        flags[0] = " 1";
        flags[1] = "01";
        flags[2] = "true";
        flags[3] = "1";
        assert_eq!(genres_from_flags(flags), vec!["Children"]);
    }

    #[test]
    fn extra_flags_beyond_table_are_ignored() {
        let mut flags = window(&[]);
        flags.push("1");
        assert_eq!(genres_from_flags(flags), vec![UNKNOWN_GENRE]);
    }

    #[test]
    fn join_uses_pipe() {
        let genres = vec!["Drama".to_owned(), "War".to_owned()];
        assert_eq!(join_genres(&genres), "Drama|War");
    }
}
