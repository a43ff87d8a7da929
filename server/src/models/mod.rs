pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistChanges, NewArtist};
pub use show::{NewShow, Show, ShowCounterpart, ShowListing};
pub use venue::{NewVenue, Venue, VenueChanges};
