mod artist_message;
mod channel;
mod history;
mod message;

pub use artist_message::{ArtistMessage, AttachmentFile, MessageRef};
pub use channel::{Channel, ChannelId, GuildId};
pub use history::HistoryWindow;
pub use message::{Attachment, Message, MessageAuthor, MessageId, MessageKind};
