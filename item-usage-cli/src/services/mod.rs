// Business logic services layer
//
// Pure pipeline logic over a `ContentSource`, reusable from the one-shot
// commands and the interactive shell alike.

pub mod usage;
