pub mod assets {
    pub mod domain {
        pub mod asset_source;
        pub mod asset_stager;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod cascade_backend;
        pub mod detector;
        pub mod detector_bank;
        pub mod detector_kind;
    }
    pub mod infrastructure;
}

pub mod overlay {
    pub mod domain {
        pub mod grayscale_buffer;
        pub mod mode;
        pub mod mode_selector;
        pub mod region_painter;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod detection_session;
    pub mod frame_processor;
    pub mod pipeline_logger;
    pub mod trigger;
}

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod region;
    pub mod video_metadata;
}

pub mod video {
    pub mod domain {
        pub mod frame_sink;
        pub mod frame_source;
    }
    pub mod infrastructure;
}
