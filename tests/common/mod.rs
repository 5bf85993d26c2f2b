pub mod fake_dom;
