mod channel_stats_use_case;
mod copy_images_use_case;

pub use channel_stats_use_case::{ChannelStats, ChannelStatsUseCase};
pub use copy_images_use_case::{CopyImagesRequest, CopyImagesUseCase};
