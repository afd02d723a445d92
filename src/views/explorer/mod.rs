mod explorer_view;

pub use explorer_view::ExplorerView;
