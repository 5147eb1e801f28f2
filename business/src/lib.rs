pub mod application {
    pub mod cart {
        pub mod add_by_barcode;
        pub mod store;
    }
    pub mod product {
        pub mod get_by_barcode;
        pub mod get_by_brand;
        pub mod get_by_category;
        pub mod popular;
        pub mod search;
        pub mod suggestions;
    }
    pub mod query {
        pub mod cache;
        pub mod client;
        pub mod key;
        pub mod observer;
        pub mod retry;
    }
    pub mod search {
        pub mod debounce;
        pub mod session;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod lenient;
    }
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod add_by_barcode;
            pub mod manage;
        }
    }
    pub mod product {
        pub mod catalog_options;
        pub mod errors;
        pub mod formatters;
        pub mod model;
        pub mod query;
        pub mod services;
        pub mod sorting;
        pub mod value_objects;
        pub mod use_cases {
            pub mod get_by_barcode;
            pub mod get_by_brand;
            pub mod get_by_category;
            pub mod popular;
            pub mod search;
            pub mod suggestions;
        }
    }
}
