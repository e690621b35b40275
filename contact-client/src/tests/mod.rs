mod state_tests;
