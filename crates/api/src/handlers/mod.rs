pub mod entourage;
